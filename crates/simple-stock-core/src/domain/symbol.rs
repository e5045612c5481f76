use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Sentinel ticker that routes to the static README page.
pub const README_TICKER: &str = "README";

/// Upper-cased exchange ticker such as `AAPL` or `STG.AX`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Trim and upper-case `input`, then check it looks like a ticker:
    /// a leading letter followed by letters, digits, `.` or `-`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let ticker = input.trim().to_ascii_uppercase();

        let mut chars = ticker.chars();
        match chars.next() {
            None => return Err(ValidationError::EmptySymbol),
            Some(ch) if !ch.is_ascii_alphabetic() => {
                return Err(ValidationError::SymbolInvalidStart { ch })
            }
            Some(_) => {}
        }

        let len = ticker.len();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        if let Some((index, ch)) = ticker
            .char_indices()
            .find(|&(_, ch)| !(ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-')))
        {
            return Err(ValidationError::SymbolInvalidChar { ch, index });
        }

        Ok(Self(ticker))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

/// A dashboard selection: either the README page or a stock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TickerSymbol {
    Readme,
    Stock(Symbol),
}

impl TickerSymbol {
    /// Parse a selection without consulting the allow-list.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.trim().eq_ignore_ascii_case(README_TICKER) {
            return Ok(Self::Readme);
        }
        Symbol::parse(input).map(Self::Stock)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Readme => README_TICKER,
            Self::Stock(symbol) => symbol.as_str(),
        }
    }

    pub const fn is_readme(&self) -> bool {
        matches!(self, Self::Readme)
    }
}

impl Display for TickerSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for TickerSymbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TickerSymbol> for String {
    fn from(value: TickerSymbol) -> Self {
        value.as_str().to_owned()
    }
}
