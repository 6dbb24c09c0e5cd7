//! Concourse `out` executable: runs the configured Cycloid feature and reports the new version.

use std::io;
use std::process::ExitCode;

use cycloid_resource::Verb;

fn main() -> ExitCode {
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    cycloid_resource::run(Verb::Out, std::env::args_os(), stdin, &mut stdout, &mut stderr)
}
