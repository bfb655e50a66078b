use domain::PipelineError;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Vercel 对原始请求体做 HMAC-SHA1，hex 编码放在 x-vercel-signature 头。
///
/// secret 未配置时的行为由 permissive 开关决定：宽松模式放行（初始接入期的
/// 刻意妥协，不是安全建议），严格模式一律拒绝。配置了 secret 则缺头或不匹配
/// 都在任何解析之前拒绝。
pub fn verify_vercel_signature(
    body: &[u8],
    header_value: Option<&str>,
    secret: Option<&str>,
    permissive: bool,
) -> Result<(), PipelineError> {
    let Some(secret) = secret else {
        if permissive {
            return Ok(());
        }
        return Err(PipelineError::MissingSignature);
    };

    let provided = header_value.ok_or(PipelineError::MissingSignature)?;
    let expected = compute_sha1_hex(body, secret);

    if !constant_time_eq(expected.as_bytes(), provided.as_bytes()) {
        return Err(PipelineError::InvalidSignature);
    }
    Ok(())
}

pub fn compute_sha1_hex(body: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// 已知缺口：GitHub Action 回调当前不带可校验的签名头，这里始终放行。
/// secret 先收下占位，回调端补上签名后按 Vercel 路径的方式实现校验。
pub fn verify_github_signature(
    _body: &[u8],
    _secret: Option<&str>,
) -> Result<(), PipelineError> {
    Ok(())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_signature_passes() {
        let body = b"{\"type\":\"deployment.succeeded\"}";
        let sig = compute_sha1_hex(body, "topsecret");
        assert!(verify_vercel_signature(body, Some(&sig), Some("topsecret"), false).is_ok());
    }

    #[test]
    fn missing_header_with_secret_is_rejected() {
        let err = verify_vercel_signature(b"{}", None, Some("topsecret"), true).unwrap_err();
        assert!(matches!(err, PipelineError::MissingSignature));
    }

    #[test]
    fn mismatched_signature_is_rejected() {
        let err =
            verify_vercel_signature(b"{}", Some("deadbeef"), Some("topsecret"), true).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidSignature));
    }

    #[test]
    fn tampered_body_is_rejected() {
        let sig = compute_sha1_hex(b"original", "topsecret");
        assert!(verify_vercel_signature(b"tampered", Some(&sig), Some("topsecret"), false).is_err());
    }

    #[test]
    fn no_secret_permissive_accepts_everything() {
        assert!(verify_vercel_signature(b"{}", None, None, true).is_ok());
    }

    #[test]
    fn no_secret_strict_rejects() {
        let err = verify_vercel_signature(b"{}", None, None, false).unwrap_err();
        assert!(matches!(err, PipelineError::MissingSignature));
    }

    #[test]
    fn github_verifier_is_a_documented_noop() {
        assert!(verify_github_signature(b"anything", Some("secret")).is_ok());
        assert!(verify_github_signature(b"anything", None).is_ok());
    }
}
