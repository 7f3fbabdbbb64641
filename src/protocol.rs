use crate::error::ProtocolError;
use bytes::Bytes;
use nom::{
    IResult,
    bytes::complete::{tag, take_while1},
    combinator::eof,
};

/// One replicated mutation. This is both the unit of fan-out and the unit
/// of wire transmission: one encoded command per connection write.
///
/// Commands carry no sequence number, timestamp, or origin identity. Each
/// node applies them in arrival order, so the last command *applied* wins
/// on that node, independently of every other node.
#[derive(Debug, PartialEq, Clone)]
pub enum Command {
    Put { key: String, value: String },
    Delete { key: String },
}

fn parse_token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace())(input)
}

fn parse_put_command(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag("PUT ")(input)?;
    let (input, key) = parse_token(input)?;
    let (input, _) = tag(" ")(input)?;
    let (input, value) = parse_token(input)?;
    let (input, _) = eof(input)?;

    Ok((
        input,
        Command::Put {
            key: key.to_string(),
            value: value.to_string(),
        },
    ))
}

fn parse_delete_command(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag("DELETE ")(input)?;
    let (input, key) = parse_token(input)?;
    let (input, _) = eof(input)?;

    Ok((
        input,
        Command::Delete {
            key: key.to_string(),
        },
    ))
}

impl Command {
    /// Parses one wire message: `PUT <key> <value>` or `DELETE <key>`,
    /// single-space separated, no terminator. Anything else is rejected,
    /// including extra tokens, embedded whitespace, and non-UTF-8 bytes.
    pub fn parse(input: &[u8]) -> Result<Self, ProtocolError> {
        let text = std::str::from_utf8(input).map_err(|_| {
            ProtocolError::Malformed("not valid UTF-8".to_string())
        })?;

        let result =
            parse_put_command(text).or_else(|_| parse_delete_command(text));

        match result {
            Ok((_, cmd)) => Ok(cmd),
            Err(_) => Err(ProtocolError::Malformed(text.to_string())),
        }
    }

    /// Encodes the command into its wire form. Round-trips through
    /// [`Command::parse`] for every key/value this encoding supports
    /// (keys and values must not contain whitespace).
    pub fn encode(&self) -> Bytes {
        let text = match self {
            Command::Put { key, value } => format!("PUT {} {}", key, value),
            Command::Delete { key } => format!("DELETE {}", key),
        };
        Bytes::from(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_put_command() {
        let result = Command::parse(b"PUT mykey myvalue").unwrap();

        assert_eq!(
            result,
            Command::Put {
                key: "mykey".to_string(),
                value: "myvalue".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_delete_command() {
        let result = Command::parse(b"DELETE mykey").unwrap();

        assert_eq!(
            result,
            Command::Delete {
                key: "mykey".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_command() {
        assert!(Command::parse(b"GET mykey").is_err());
        assert!(Command::parse(b"invalid").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_value() {
        let result = Command::parse(b"PUT mykey");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_extra_tokens() {
        assert!(Command::parse(b"PUT mykey myvalue extra").is_err());
        assert!(Command::parse(b"DELETE mykey extra").is_err());
    }

    #[test]
    fn test_parse_rejects_trailing_whitespace() {
        assert!(Command::parse(b"PUT mykey myvalue ").is_err());
        assert!(Command::parse(b"DELETE mykey\n").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!(Command::parse(b"").is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_utf8() {
        let result = Command::parse(&[0xff, 0xfe, 0x00]);
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_put_command() {
        let command = Command::Put {
            key: "mykey".to_string(),
            value: "myvalue".to_string(),
        };
        assert_eq!(&command.encode()[..], b"PUT mykey myvalue");
    }

    #[test]
    fn test_encode_delete_command() {
        let command = Command::Delete {
            key: "mykey".to_string(),
        };
        assert_eq!(&command.encode()[..], b"DELETE mykey");
    }

    #[test]
    fn test_round_trip_put() {
        let command = Command::Put {
            key: "counter".to_string(),
            value: "42".to_string(),
        };
        assert_eq!(Command::parse(&command.encode()).unwrap(), command);
    }

    #[test]
    fn test_round_trip_delete() {
        let command = Command::Delete {
            key: "counter".to_string(),
        };
        assert_eq!(Command::parse(&command.encode()).unwrap(), command);
    }
}
