use crate::core_ftpclient::error::FtpError;
use regex::Regex;
use std::fmt;
use std::net::Ipv4Addr;
use std::sync::OnceLock;

const REPLY_LINE_REGEX: &str = r"^(\d{3})(?:([ -])(.*))?$";
const EPSV_TUPLE_REGEX: &str = r"\(\|\|\|(\d{1,5})\|\)";
const PASV_TUPLE_REGEX: &str =
    r"\((\d{1,3}),\s*(\d{1,3}),\s*(\d{1,3}),\s*(\d{1,3}),\s*(\d{1,3}),\s*(\d{1,3})\)";

fn reply_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(REPLY_LINE_REGEX).expect("reply line regex is valid"))
}

fn epsv_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EPSV_TUPLE_REGEX).expect("EPSV regex is valid"))
}

fn pasv_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PASV_TUPLE_REGEX).expect("PASV regex is valid"))
}

/// Outcome class carried by the first digit of a reply code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyClass {
    Preliminary,
    Completion,
    Intermediate,
    TransientNegative,
    PermanentNegative,
}

/// One complete control-channel reply. Multi-line text is joined with `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpReply {
    pub code: u16,
    pub text: String,
}

/// First line of a reply, before any continuation lines are read.
#[derive(Debug, PartialEq, Eq)]
pub struct ReplyLine {
    pub code: u16,
    pub continued: bool,
    pub text: String,
}

impl ReplyLine {
    pub fn parse(line: &str) -> Result<Self, FtpError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let caps = reply_line_regex()
            .captures(line)
            .ok_or_else(|| FtpError::MalformedReply(line.to_string()))?;

        let code: u16 = caps[1]
            .parse()
            .map_err(|_| FtpError::MalformedReply(line.to_string()))?;
        if !(100..600).contains(&code) {
            return Err(FtpError::MalformedReply(line.to_string()));
        }

        Ok(Self {
            code,
            continued: caps.get(2).map(|m| m.as_str() == "-").unwrap_or(false),
            text: caps
                .get(3)
                .map(|m| m.as_str().trim_end().to_string())
                .unwrap_or_default(),
        })
    }

    /// True if `line` terminates a multi-line reply opened with this code.
    pub fn is_terminator(&self, line: &str) -> bool {
        let line = line.trim_end_matches(['\r', '\n']);
        let code = self.code.to_string();
        line == code || line.starts_with(&format!("{} ", code))
    }
}

impl FtpReply {
    pub fn new(code: u16, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
        }
    }

    pub fn class(&self) -> ReplyClass {
        match self.code / 100 {
            1 => ReplyClass::Preliminary,
            2 => ReplyClass::Completion,
            3 => ReplyClass::Intermediate,
            4 => ReplyClass::TransientNegative,
            _ => ReplyClass::PermanentNegative,
        }
    }

    pub fn is_negative(&self) -> bool {
        matches!(
            self.class(),
            ReplyClass::TransientNegative | ReplyClass::PermanentNegative
        )
    }

    /// Port from a `229 ... (|||port|)` reply. The address part is never used.
    pub fn epsv_port(&self) -> Option<u16> {
        let caps = epsv_regex().captures(&self.text)?;
        let port: u16 = caps[1].parse().ok()?;
        (port != 0).then_some(port)
    }

    /// Advertised address and port from a `227 ... (h1,h2,h3,h4,p1,p2)` reply.
    pub fn pasv_address(&self) -> Option<(Ipv4Addr, u16)> {
        let caps = pasv_regex().captures(&self.text)?;
        let mut octets = [0u8; 6];
        for (i, octet) in octets.iter_mut().enumerate() {
            *octet = caps[i + 1].parse().ok()?;
        }
        let ip = Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]);
        let port = (octets[4] as u16) * 256 + octets[5] as u16;
        (port != 0).then_some((ip, port))
    }
}

impl fmt::Display for FtpReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.text.replace('\n', " "))
    }
}
