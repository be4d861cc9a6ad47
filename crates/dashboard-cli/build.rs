//! Stamps `dashctl --version` with the commit it was built from.
//!
//! Produces `DASHCTL_VERSION` as `<crate version>` or, inside a git checkout,
//! `<crate version> (<short hash>[-dirty])`.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let version = match commit_label() {
        Some(label) => format!("{} ({})", env!("CARGO_PKG_VERSION"), label),
        None => env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("cargo:rustc-env=DASHCTL_VERSION={}", version);
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string())
}

fn commit_label() -> Option<String> {
    let hash = git(&["rev-parse", "--short", "HEAD"]).filter(|h| !h.is_empty())?;
    let dirty = git(&["status", "--porcelain", "--untracked-files=no"])
        .is_some_and(|changes| !changes.is_empty());

    Some(if dirty { format!("{}-dirty", hash) } else { hash })
}
