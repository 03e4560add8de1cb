//! Identifier kinds understood by the mapping service.

use crate::error::FigiError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An enumerated category of input identifier (ISIN, CUSIP, ticker, ...).
///
/// Serializes as the wire token (`"ID_ISIN"`, `"TICKER"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdType {
    Isin,
    BbUnique,
    Sedol,
    Common,
    Wertpapier,
    Cusip,
    Bb,
    Italy,
    ExchSymbol,
    FullExchangeSymbol,
    CompositeBbGlobal,
    BbGlobalShareClassLevel,
    BbSecNumDes,
    BbGlobal,
    Ticker,
    Cusip8Chr,
    OccSymbol,
    UniqueFutOpt,
    OpraSymbol,
    TradingSystemIdentifier,
}

impl IdType {
    /// Every identifier kind, in help-text order.
    pub const ALL: [IdType; 20] = [
        IdType::Isin,
        IdType::BbUnique,
        IdType::Sedol,
        IdType::Common,
        IdType::Wertpapier,
        IdType::Cusip,
        IdType::Bb,
        IdType::Italy,
        IdType::ExchSymbol,
        IdType::FullExchangeSymbol,
        IdType::CompositeBbGlobal,
        IdType::BbGlobalShareClassLevel,
        IdType::BbSecNumDes,
        IdType::BbGlobal,
        IdType::Ticker,
        IdType::Cusip8Chr,
        IdType::OccSymbol,
        IdType::UniqueFutOpt,
        IdType::OpraSymbol,
        IdType::TradingSystemIdentifier,
    ];

    /// The token sent on the wire as `idType`.
    pub fn as_str(self) -> &'static str {
        match self {
            IdType::Isin => "ID_ISIN",
            IdType::BbUnique => "ID_BB_UNIQUE",
            IdType::Sedol => "ID_SEDOL",
            IdType::Common => "ID_COMMON",
            IdType::Wertpapier => "ID_WERTPAPIER",
            IdType::Cusip => "ID_CUSIP",
            IdType::Bb => "ID_BB",
            IdType::Italy => "ID_ITALY",
            IdType::ExchSymbol => "ID_EXCH_SYMBOL",
            IdType::FullExchangeSymbol => "ID_FULL_EXCHANGE_SYMBOL",
            IdType::CompositeBbGlobal => "COMPOSITE_ID_BB_GLOBAL",
            IdType::BbGlobalShareClassLevel => "ID_BB_GLOBAL_SHARE_CLASS_LEVEL",
            IdType::BbSecNumDes => "ID_BB_SEC_NUM_DES",
            IdType::BbGlobal => "ID_BB_GLOBAL",
            IdType::Ticker => "TICKER",
            IdType::Cusip8Chr => "ID_CUSIP_8_CHR",
            IdType::OccSymbol => "OCC_SYMBOL",
            IdType::UniqueFutOpt => "UNIQUE_ID_FUT_OPT",
            IdType::OpraSymbol => "OPRA_SYMBOL",
            IdType::TradingSystemIdentifier => "TRADING_SYSTEM_IDENTIFIER",
        }
    }

    /// Human-readable name, for help text only.
    pub fn description(self) -> &'static str {
        match self {
            IdType::Isin => "ISIN",
            IdType::BbUnique => "Unique Bloomberg Identifier",
            IdType::Sedol => "Sedol Number",
            IdType::Common => "Common Code",
            IdType::Wertpapier => "Wertpapierkennnummer/WKN",
            IdType::Cusip => "CUSIP",
            IdType::Bb => "ID BB",
            IdType::Italy => "Italian Identifier Number",
            IdType::ExchSymbol => "Local Exchange Security Symbol",
            IdType::FullExchangeSymbol => "Full Exchange Symbol",
            IdType::CompositeBbGlobal => "Composite Financial Instrument Global Identifier",
            IdType::BbGlobalShareClassLevel => {
                "Share Class Financial Instrument Global Identifier"
            }
            IdType::BbSecNumDes => "Security ID Number Description",
            IdType::BbGlobal => "Financial Instrument Global Identifier (FIGI)",
            IdType::Ticker => "Ticker",
            IdType::Cusip8Chr => "CUSIP (8 Characters Only)",
            IdType::OccSymbol => "OCC Symbol",
            IdType::UniqueFutOpt => "Unique Identifier for Future Option",
            IdType::OpraSymbol => "OPRA Symbol",
            IdType::TradingSystemIdentifier => "Trading System Identifier",
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdType {
    type Err = FigiError;

    /// Tokens are matched exactly; the service is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FigiError::UnknownIdType(s.to_string()))
    }
}

impl Serialize for IdType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IdType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}
