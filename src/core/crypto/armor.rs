//! PEM envelope handling.
//!
//! Framing, RFC 1421 headers and base64 are handled by the `pem` crate. This
//! layer picks the block to decode and rejects encrypted ones.

use pem::Pem;
use tracing::trace;
use zeroize::Zeroizing;

use crate::core::constants::labels;
use crate::error::DecodeError;

const BEGIN: &str = "-----BEGIN ";
const PARAMETERS_SUFFIX: &str = " PARAMETERS";
const PROC_TYPE: &str = "Proc-Type";

/// A single decoded PEM block.
pub(crate) struct PemBlock {
    pub label: String,
    pub der: Zeroizing<Vec<u8>>,
}

/// Decode the first key or certificate block found in `text`.
///
/// Leading parameter blocks such as the `DSA PARAMETERS` or `EC PARAMETERS`
/// that `openssl dsaparam -genkey` and `openssl ecparam -genkey` emit are
/// skipped. Text outside the blocks is ignored.
///
/// # Errors
///
/// Returns `DecodeError` if no block is present, the framing or base64 is
/// invalid, or the block is encrypted.
pub(crate) fn decode(text: &str) -> Result<PemBlock, DecodeError> {
    let blocks = pem::parse_many(text)?;
    let Some(first_label) = blocks.first().map(|block| block.tag().to_string()) else {
        // parse_many drops a BEGIN line that has no END line
        if text.contains(BEGIN) {
            return Err(pem::PemError::MissingEndTag.into());
        }
        return Err(DecodeError::MissingArmor);
    };

    let skipped = blocks.iter().take_while(|block| is_parameters(block)).count();
    let block = blocks
        .into_iter()
        .nth(skipped)
        .ok_or(DecodeError::UnsupportedLabel(first_label))?;

    if skipped > 0 {
        trace!(skipped, "skipped parameter blocks");
    }
    if block.tag() == labels::ENCRYPTED_PRIVATE_KEY {
        return Err(DecodeError::Encrypted(block.tag().to_string()));
    }
    if block
        .headers()
        .get(PROC_TYPE)
        .is_some_and(|value| value.contains("ENCRYPTED"))
    {
        return Err(DecodeError::Encrypted(block.tag().to_string()));
    }

    let label = block.tag().to_string();
    let der = Zeroizing::new(block.into_contents());

    trace!(label = %label, der_len = der.len(), "pem block decoded");

    Ok(PemBlock { label, der })
}

fn is_parameters(block: &Pem) -> bool {
    block.tag().ends_with(PARAMETERS_SUFFIX)
}
