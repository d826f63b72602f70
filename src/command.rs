//! Line-oriented command stream driving a [`FamilyTree`].
//!
//! The first line of a session seeds the root member (`<label> <key>`);
//! every following line is one command. Narration events and analysis
//! results interleave into the same output sink in call order.

use crate::avl_tree::FamilyTree;
use crate::error::Error;
use crate::event::{EventSink, WriterSink};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// A parsed command line.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    MemberIn { label: String, key: f64 },
    MemberOut { key: f64 },
    IntelTarget { key1: f64, key2: f64 },
    IntelDivide,
    IntelRank { key: f64 },
}

fn token<'a>(tokens: &[&'a str], index: usize, line: &str) -> Result<&'a str, Error> {
    tokens
        .get(index)
        .copied()
        .ok_or_else(|| Error::MalformedCommand(line.to_owned()))
}

fn parse_key(token: &str) -> Result<f64, Error> {
    token.parse().map_err(|source| Error::InvalidNumber {
        token: token.to_owned(),
        source,
    })
}

impl FromStr for Command {
    type Err = Error;

    /// Parses a space-delimited command line. Placeholder tokens (`_`) are
    /// positional and skipped, never interpreted.
    fn from_str(line: &str) -> Result<Self, Error> {
        let tokens = line.split_whitespace().collect::<Vec<_>>();
        match token(&tokens, 0, line)? {
            "MEMBER_IN" => Ok(Command::MemberIn {
                label: token(&tokens, 1, line)?.to_owned(),
                key: parse_key(token(&tokens, 2, line)?)?,
            }),
            "MEMBER_OUT" => Ok(Command::MemberOut {
                key: parse_key(token(&tokens, 2, line)?)?,
            }),
            "INTEL_TARGET" => Ok(Command::IntelTarget {
                key1: parse_key(token(&tokens, 2, line)?)?,
                key2: parse_key(token(&tokens, 4, line)?)?,
            }),
            "INTEL_DIVIDE" => Ok(Command::IntelDivide),
            "INTEL_RANK" => Ok(Command::IntelRank {
                key: parse_key(token(&tokens, 2, line)?)?,
            }),
            keyword => Err(Error::UnknownCommand(keyword.to_owned())),
        }
    }
}

/// Runs a full command session, reading commands from `reader` and writing
/// narration and analysis results to `writer`.
///
/// # Examples
/// ```
/// use family_tree::command;
///
/// let input = "Don 50\nMEMBER_IN Son 30\nINTEL_DIVIDE\n";
/// let mut output = Vec::new();
/// command::run(input.as_bytes(), &mut output).unwrap();
/// assert_eq!(
///     String::from_utf8(output).unwrap(),
///     "Don welcomed Son\nDivision Analysis Result: 1\n",
/// );
/// ```
pub fn run<R, W>(reader: R, writer: W) -> Result<(), Error>
where
    R: BufRead,
    W: Write,
{
    let mut lines = reader.lines();
    let first = lines.next().ok_or(Error::EmptyInput)?.map_err(Error::Io)?;
    let tokens = first.split_whitespace().collect::<Vec<_>>();
    let label = token(&tokens, 0, &first)?;
    let key = parse_key(token(&tokens, 1, &first)?)?;

    let mut tree = FamilyTree::new(label, key);
    let mut sink = WriterSink::new(writer);

    for line in lines {
        let line = line.map_err(Error::Io)?;
        if line.trim().is_empty() {
            continue;
        }
        execute(&mut tree, line.parse()?, &mut sink)?;
    }

    sink.flush().map_err(Error::Io)
}

/// Applies one command to the tree. Analysis commands write their result
/// line; a target analysis whose keys are both absent writes nothing.
pub fn execute<S>(tree: &mut FamilyTree, command: Command, sink: &mut S) -> Result<(), Error>
where
    S: EventSink,
{
    match command {
        Command::MemberIn { label, key } => {
            tree.insert(&label, key, sink)?;
        }
        Command::MemberOut { key } => {
            tree.remove(key, sink)?;
        }
        Command::IntelTarget { key1, key2 } => {
            if let Some(member) = tree.lowest_common_ancestor(key1, key2) {
                sink.emit(&format!(
                    "Target Analysis Result: {} {}",
                    member.label, member.key
                ))?;
            }
        }
        Command::IntelDivide => {
            sink.emit(&format!(
                "Division Analysis Result: {}",
                tree.max_independent_members()
            ))?;
        }
        Command::IntelRank { key } => {
            let mut line = String::from("Rank Analysis Result:");
            for member in tree.members_at_same_rank(key) {
                line.push_str(&format!(" {} {}", member.label, member.key));
            }
            sink.emit(&line)?;
        }
    }
    Ok(())
}
