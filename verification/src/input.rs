use std::collections::VecDeque;
use std::io::{BufRead, Write};

use bignum::BigInt as BigNum;
use bignum::BigNumTrait;
use failure::ResultExt;

use crate::errors::*;

// (name, prompt) in the order the values are read
const FIELDS: [(&str, &str); 7] = [
    ("p", "p: "),
    ("q", "q: "),
    ("h", "h: "),
    ("x", "x: "),
    ("k", "k: "),
    ("H(M1)", "H(M1) (real hash): "),
    ("H(M2)", "H(M2) (fake hash): "),
];

/// The seven integers the demonstration starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub p: BigNum,
    pub q: BigNum,
    pub h: BigNum,
    pub x: BigNum,
    pub k: BigNum,
    pub hash1: BigNum,
    pub hash2: BigNum,
}

impl Inputs {
    // Builds the inputs from one value per entry of `FIELDS`, asked for by index in order.
    fn collect<F>(mut value: F) -> Result<Self, Error>
    where
        F: FnMut(usize) -> Result<BigNum, Error>,
    {
        Ok(Inputs {
            p: value(0)?,
            q: value(1)?,
            h: value(2)?,
            x: value(3)?,
            k: value(4)?,
            hash1: value(5)?,
            hash2: value(6)?,
        })
    }

    /// Takes the integers from the command line, in the same order as the prompts.
    pub fn from_args(args: &[String]) -> Result<Self, Error> {
        if args.len() != FIELDS.len() {
            return Err(VerificationError::WrongArgumentCount { found: args.len() }.into());
        }
        Inputs::collect(|i| parse(&args[i], FIELDS[i].0))
    }

    /// Prompts for each integer on `writer` and reads the answers from `reader`. Several values
    /// may share a line.
    pub fn read<R: BufRead, W: Write>(reader: R, writer: &mut W) -> Result<Self, Error> {
        writeln!(writer, "Please input the following values:\n")?;
        let mut tokens = Tokens::new(reader);
        Inputs::collect(|i| {
            let (name, prompt) = FIELDS[i];
            write!(writer, "{}", prompt)?;
            writer.flush()?;
            let token = tokens.next(name)?;
            parse(&token, name)
        })
    }
}

fn parse(token: &str, name: &str) -> Result<BigNum, Error> {
    let value = BigNum::from_dec_str(token).context(format!("reading {}", name))?;
    Ok(value)
}

struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Tokens {
            reader,
            pending: VecDeque::new(),
        }
    }

    fn next(&mut self, label: &str) -> Result<String, Error> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(VerificationError::UnexpectedEnd {
                    label: label.to_owned(),
                }
                .into());
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(u: u32) -> BigNum {
        BigNum::from_u32(u)
    }

    fn expected() -> Inputs {
        Inputs {
            p: int(23),
            q: int(11),
            h: int(4),
            x: int(3),
            k: int(2),
            hash1: int(5),
            hash2: int(9),
        }
    }

    #[test]
    fn read_one_value_per_line() {
        let mut prompts = Vec::new();
        let inputs = Inputs::read(&b"23\n11\n4\n3\n2\n5\n9\n"[..], &mut prompts).unwrap();
        assert_eq!(expected(), inputs);

        let prompts = String::from_utf8(prompts).unwrap();
        assert!(prompts.starts_with("Please input the following values:\n\np: q: h: "));
        assert!(prompts.ends_with("H(M1) (real hash): H(M2) (fake hash): "));
    }

    #[test]
    fn read_values_sharing_lines() {
        let inputs = Inputs::read(&b"23 11 4\n\n3 2\t5\n 9"[..], &mut Vec::new()).unwrap();
        assert_eq!(expected(), inputs);
    }

    #[test]
    fn read_reports_missing_value() {
        let e = Inputs::read(&b"23 11 4 3 2 5\n"[..], &mut Vec::new())
            .err()
            .unwrap();
        assert_eq!("input ended before H(M2) was read", e.to_string());
    }

    #[test]
    fn read_reports_garbage() {
        let e = Inputs::read(&b"23 eleven\n"[..], &mut Vec::new())
            .err()
            .unwrap();
        assert_eq!("reading q", e.to_string());
    }

    #[test]
    fn from_args() {
        let args: Vec<String> = ["23", "11", "4", "3", "2", "5", "9"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(expected(), Inputs::from_args(&args).unwrap());
        assert!(Inputs::from_args(&args[1..]).is_err());
    }

    #[test]
    fn from_args_names_the_bad_value() {
        let mut args: Vec<String> = ["23", "11", "4", "3", "2", "5", "9"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let e = Inputs::from_args(&args[..6]).err().unwrap();
        assert_eq!("expected 7 integers, found 6", e.to_string());

        args[5] = "five".to_owned();
        let e = Inputs::from_args(&args).err().unwrap();
        assert_eq!("reading H(M1)", e.to_string());
    }
}
