//! Concourse `in` executable: fetches a Cycloid resource version into the step directory.

use std::io;
use std::process::ExitCode;

use cycloid_resource::Verb;

fn main() -> ExitCode {
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    cycloid_resource::run(Verb::In, std::env::args_os(), stdin, &mut stdout, &mut stderr)
}
