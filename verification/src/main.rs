extern crate env_logger;
extern crate verification;

use std::env;
use std::io::{self, Write};
use std::process;

use verification::errors::{report_error, Error};
use verification::input::Inputs;
use verification::report::{print_banner, write_run};

fn main() {
    env_logger::init();

    let (strict, values) = arguments();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&mut out, strict, &values) {
        let status = report_error(&mut out, &e);
        let _ = out.flush();
        process::exit(status);
    }
}

// Returns the `--strict` flag and the remaining arguments. Without positional arguments the
// integers are read from stdin.
fn arguments() -> (bool, Vec<String>) {
    let mut strict = false;
    let mut values = Vec::new();
    for arg in env::args().skip(1) {
        if arg == "--strict" {
            strict = true;
        } else {
            values.push(arg);
        }
    }
    (strict, values)
}

fn run<W: Write>(out: &mut W, strict: bool, values: &[String]) -> Result<(), Error> {
    print_banner(out)?;

    let inputs = if values.is_empty() {
        let stdin = io::stdin();
        let reader = stdin.lock();
        Inputs::read(reader, out)?
    } else {
        Inputs::from_args(values)?
    };

    write_run(out, &inputs, strict)
}
