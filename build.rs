// build.rs

use clap::{Arg, ArgAction, ArgGroup, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("pkginfo")
        .version(concat!("(pkgutils) ", env!("CARGO_PKG_VERSION")))
        .author("pkgutils Contributors")
        .about("Display software package information")
        .disable_version_flag(true)
        .arg(
            Arg::new("installed")
                .short('i')
                .long("installed")
                .action(ArgAction::SetTrue)
                .help("List installed packages"),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .value_name("package|file")
                .help("List files in <package> or <file>"),
        )
        .arg(
            Arg::new("owner")
                .short('o')
                .long("owner")
                .value_name("pattern")
                .help("List owner(s) of file(s) matching <pattern>"),
        )
        .arg(
            Arg::new("footprint")
                .short('f')
                .long("footprint")
                .value_name("file")
                .help("Print footprint for <file>"),
        )
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_name("path")
                .help("Specify alternative installation root"),
        )
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .action(ArgAction::Version)
                .help("Print version and exit"),
        )
        .group(
            ArgGroup::new("mode")
                .required(true)
                .args(["installed", "list", "owner", "footprint"]),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory
    let out_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("Failed to create man directory");

    // Generate main man page
    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();
    man.render(&mut buffer)
        .expect("Failed to render man page");

    let man_path = man_dir.join("pkginfo.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");
}
