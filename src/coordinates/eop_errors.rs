use reqwest;
use std::{error::Error, fmt, io};

#[derive(Debug)]
pub enum EOPErrors {
    IoError(std::io::Error),
    ReqwestError(reqwest::Error),
    CsvError(csv::Error),
    MissingEOPData,
    HttpForbidden,
}

impl fmt::Display for EOPErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EOPErrors::IoError(e) => write!(f, "I/O error: {}", e),
            EOPErrors::ReqwestError(e) => write!(f, "Request error: {}", e),
            EOPErrors::CsvError(e) => write!(f, "CSV parsing error: {}", e),
            EOPErrors::MissingEOPData => write!(f, "EOP data is missing"),
            EOPErrors::HttpForbidden => write!(f, "HTTP 403 Forbidden"),
        }
    }
}

impl Error for EOPErrors {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EOPErrors::IoError(e) => Some(e),
            EOPErrors::ReqwestError(e) => Some(e),
            EOPErrors::CsvError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for EOPErrors {
    fn from(err: io::Error) -> Self {
        EOPErrors::IoError(err)
    }
}

impl From<reqwest::Error> for EOPErrors {
    fn from(err: reqwest::Error) -> Self {
        EOPErrors::ReqwestError(err)
    }
}

impl From<csv::Error> for EOPErrors {
    fn from(err: csv::Error) -> Self {
        EOPErrors::CsvError(err)
    }
}
