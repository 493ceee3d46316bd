//! Key and certificate commands (key, cert, inspect).
//!
//! Only public properties are printed. Private values never reach the terminal.

use std::path::Path;

use crate::cli::output;
use crate::core::crypto::{self, Certificate, Key, KeyMaterial, PublicKey};
use crate::core::environment::Environment;
use crate::error::Result;

/// Describe the key stored at `path` in a service's credentials.
pub fn key(env: &Environment, service: &str, path: &[&str]) -> Result<()> {
    let key = env.service(service)?.credentials().get_key(path)?;
    describe_key(&key);
    Ok(())
}

/// Describe the certificate stored at `path` in a service's credentials.
pub fn cert(env: &Environment, service: &str, path: &[&str]) -> Result<()> {
    let certificate = env.service(service)?.credentials().get_certificate(path)?;
    describe_certificate(&certificate)
}

/// Describe whatever PEM block a file holds.
pub fn file(path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)?;
    match crypto::parse(&text)? {
        KeyMaterial::Certificate(certificate) => describe_certificate(&certificate)?,
        KeyMaterial::PublicKey(key) => describe_key(&Key::Public(key)),
        KeyMaterial::PrivateKey(key) => describe_key(&Key::Private(key)),
    }
    Ok(())
}

fn describe_key(key: &Key) {
    let kind = if key.is_private() { "private key" } else { "public key" };
    output::header(&format!("{} {}", key.algorithm(), kind));
    output::kv("bits", key.bits());
    describe_public_fields(&key.public_key());
}

fn describe_public_fields(key: &PublicKey) {
    match key {
        PublicKey::Rsa(rsa) => output::kv("exponent", rsa.public_exponent()),
        PublicKey::Ec(ec) => {
            output::kv("curve", ec.curve());
            output::kv("x", ec.w().x.to_str_radix(16));
            output::kv("y", ec.w().y.to_str_radix(16));
        }
        PublicKey::Dsa(dsa) => output::kv("q bits", dsa.params().q().bits()),
        PublicKey::Dh(dh) => {
            output::kv("generator", dh.params().g());
            if let Some(length) = dh.params().private_value_length() {
                output::kv("x length", length);
            }
        }
    }
}

fn describe_certificate(certificate: &Certificate) -> Result<()> {
    output::header("certificate");
    output::kv("subject", certificate.subject());
    output::kv("issuer", certificate.issuer());
    output::kv("serial", certificate.serial_number());
    output::kv("not before", certificate.not_before().to_rfc3339());
    output::kv("not after", certificate.not_after().to_rfc3339());
    output::kv("signature", certificate.signature_algorithm());
    output::kv("sha256", certificate.sha256_fingerprint());

    let key = certificate.public_key()?;
    output::kv("key", format!("{} {} bits", key.algorithm(), key.bits()));
    if certificate.is_self_issued() {
        output::dimmed("  self-issued");
    }
    Ok(())
}
