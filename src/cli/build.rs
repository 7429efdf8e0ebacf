//! Le build script.

use std::env;
use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::str;


/// File in the $OUT_DIR where the current revision is written.
const REVISION_FILE: &'static str = "revision";


fn main() {
    // Obtain Git SHA to pass it further to the crate code via ad-hoc file.
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by Cargo");
    let rev_path = Path::new(&out_dir).join(REVISION_FILE);
    let mut revision_file = File::create(&rev_path).expect("cannot create revision file");
    match git_head_sha() {
        Ok(rev) => revision_file.write_all(rev.as_bytes()).expect("cannot write revision file"),
        Err(e) => println!("cargo:warning=Failed to obtain current Git SHA: {}", e),
    };
    println!("cargo:rerun-if-changed=../../.git/HEAD");
}

fn git_head_sha() -> Result<String, Box<dyn Error>> {
    let output = Command::new("git").args(&["rev-parse", "--short", "HEAD"]).output()?;
    if !output.status.success() {
        return Err("not a Git repository".into());
    }
    let sha = str::from_utf8(&output.stdout[..])?.trim().to_owned();
    Ok(sha)
}
