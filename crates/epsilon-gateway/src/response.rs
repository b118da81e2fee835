use std::collections::BTreeMap;

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;

use crate::encoding::{decode_legacy_text, decode_payload};
use crate::error::GatewayError;

pub const TRANS_CODE: &str = "trans_code";
pub const ERR_CODE: &str = "err_code";
pub const ERR_DETAIL: &str = "err_detail";

/// Element whose attributes carry the reply fields.
const RESULT_ELEMENT: &[u8] = b"result";

/// Normalized outcome of a purchase the gateway answered with 2xx.
///
/// Only [`Response::parse`] builds one, so `success` and the error fields in
/// `params` always agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    success: bool,
    params: BTreeMap<String, String>,
}

impl Response {
    /// Parse a raw reply body.
    ///
    /// Every attribute of every `result` element lands in `params`; the first
    /// occurrence of a key wins. A non-empty `err_code` marks the purchase as
    /// failed and `err_detail` is decoded from percent-encoded CP932.
    pub fn parse(body: &[u8]) -> Result<Self, GatewayError> {
        let xml = decode_payload(body)?;
        let mut params = result_attributes(&xml)?;

        let failed = params.get(ERR_CODE).is_some_and(|code| !code.is_empty());
        if failed {
            if let Some(detail) = params.get_mut(ERR_DETAIL) {
                *detail = decode_legacy_text(detail);
            }
        } else {
            params.remove(ERR_CODE);
            params.remove(ERR_DETAIL);
        }

        Ok(Self {
            success: !failed,
            params,
        })
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn trans_code(&self) -> Option<&str> {
        self.param(TRANS_CODE)
    }

    pub fn err_code(&self) -> Option<&str> {
        self.param(ERR_CODE)
    }

    /// Error description, already decoded to UTF-8.
    pub fn err_detail(&self) -> Option<&str> {
        self.param(ERR_DETAIL)
    }
}

fn result_attributes(xml: &str) -> Result<BTreeMap<String, String>, GatewayError> {
    let mut reader = Reader::from_str(xml);
    let mut params = BTreeMap::new();
    let mut found = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() != RESULT_ELEMENT {
                    continue;
                }
                found = true;
                for attr in e.attributes() {
                    let attr = attr.map_err(|e| {
                        GatewayError::MalformedResponse(format!("bad attribute: {e}"))
                    })?;
                    let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
                    let value = attr.unescape_value().map_err(|e| {
                        GatewayError::MalformedResponse(format!("bad attribute value: {e}"))
                    })?;
                    params.entry(key).or_insert_with(|| value.into_owned());
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(GatewayError::MalformedResponse(format!(
                    "XML error at position {}: {e}",
                    reader.error_position()
                )))
            }
        }
    }

    if !found {
        return Err(GatewayError::MalformedResponse(
            "no result element in reply".to_string(),
        ));
    }
    Ok(params)
}
