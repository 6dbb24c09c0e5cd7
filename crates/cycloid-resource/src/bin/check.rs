//! Concourse `check` executable: re-validates the current version of a Cycloid resource.

use std::io;
use std::process::ExitCode;

use cycloid_resource::Verb;

fn main() -> ExitCode {
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    cycloid_resource::run(Verb::Check, std::env::args_os(), stdin, &mut stdout, &mut stderr)
}
