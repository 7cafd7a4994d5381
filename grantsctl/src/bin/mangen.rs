use std::io::{Error, ErrorKind, Result};
use std::path::{Path, PathBuf};
use std::{env, fs};

use clap::{Command, CommandFactory};
use clap_mangen::Man;
use grantsctl::cli::Cli;

fn main() -> Result<()> {
    let out_dir = env::var("OUT_DIR").map_err(|e| Error::new(ErrorKind::NotFound, e))?;
    let mut pages = Vec::new();
    generate_manpages(&Cli::command(), Path::new(&out_dir), &[], &mut pages)?;
    for page in &pages {
        println!("Man page generated at {}", page.display());
    }
    Ok(())
}

/// Renders one page per command, named after its path from the root
/// (`grantsctl-grants-list.1`), and records every written file in `pages`.
fn generate_manpages(
    cmd: &Command,
    out_dir: &Path,
    parents: &[String],
    pages: &mut Vec<PathBuf>,
) -> Result<()> {
    let mut cmd_path = parents.to_owned();
    cmd_path.push(cmd.get_name().to_string());

    let out_path = out_dir.join(format!("{}.1", cmd_path.join("-")));
    let mut buffer = Vec::<u8>::new();
    Man::new(cmd.clone()).render(&mut buffer)?;
    fs::write(&out_path, buffer)?;
    pages.push(out_path);

    for sub in cmd.get_subcommands() {
        generate_manpages(sub, out_dir, &cmd_path, pages)?;
    }
    Ok(())
}
