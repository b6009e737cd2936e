//! Search command implementation

use anyhow::Result;
use fskit_tree::{ListFlags, SearchSpec};

use crate::cli::SearchArgs;
use crate::output::print_paths;

pub fn execute(args: SearchArgs) -> Result<()> {
    let mut flags = ListFlags::empty();
    if args.only_dir {
        flags = flags | ListFlags::ONLY_DIR;
    }
    if args.no_case {
        flags = flags | ListFlags::NO_CASE;
    }
    if args.dot_match {
        flags = flags | ListFlags::DOT_MATCH;
    }

    let mut spec = SearchSpec::new(args.dir)
        .flags(flags)
        .files(args.patterns)
        .recurse(args.recurse);
    if let Some(needle) = &args.needle {
        spec = spec.needle(needle)?;
    }

    let paths = fskit_tree::search(&spec)?;
    print_paths(&paths);
    Ok(())
}
