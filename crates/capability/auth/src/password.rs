use subtle::ConstantTimeEq;

/// 常数时间口令比较。
///
/// 演示环境的凭据是明文常量，比较本身仍走常数时间路径，
/// 避免通过响应时延区分"用户不存在"与"口令错误"。
pub fn verify_password(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}
