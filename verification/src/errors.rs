use std::io::{self, Write};

use dsa::DsaError;

pub use failure::Error;

#[derive(Debug, Fail)]
pub enum VerificationError {
    #[fail(display = "input ended before {} was read", label)]
    UnexpectedEnd { label: String },

    #[fail(display = "expected 7 integers, found {}", found)]
    WrongArgumentCount { found: usize },

    #[fail(display = "signature rejected: {}", _0)]
    SignatureRejected(#[cause] DsaError),
}

// Exit status of the binary for a failed run.
pub const FAILURE_STATUS: i32 = 1;

/// Wraps a failure of `DsaPrivate::sign` so the report can tell it apart from the other errors.
pub fn signature_rejected(e: Error) -> Error {
    match e.downcast::<DsaError>() {
        Ok(cause) => VerificationError::SignatureRejected(cause).into(),
        Err(e) => e,
    }
}

/// Writes a failed run to `out` and returns the exit status for it.
pub fn report_error<W: Write>(out: &mut W, e: &Error) -> i32 {
    let written = match e.downcast_ref::<VerificationError>() {
        Some(VerificationError::SignatureRejected(cause)) => {
            info!("{}", cause);
            writeln!(out, "Invalid signature. Choose a different nonce k.")
        }
        _ => write_causes(out, e),
    };
    if let Err(write_error) = written {
        error!("could not write the error report: {}", write_error);
    }
    FAILURE_STATUS
}

fn write_causes<W: Write>(out: &mut W, e: &Error) -> io::Result<()> {
    writeln!(out, "An error occurred: {}", e)?;
    for cause in e.iter_chain().skip(1) {
        writeln!(out, "{: <4}caused by: {}", "", cause)?;
    }
    Ok(())
}
