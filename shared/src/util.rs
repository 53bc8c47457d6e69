//! Shared utility functions: timestamps and ID generation.

/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Generate a human-facing receipt number for an unlock payment.
///
/// Format: `TRX` + millisecond timestamp + 4 random digits. This is a
/// receipt shown to the payer and the verifying admin, not a uniqueness
/// key — the row id is the key.
pub fn transaction_number() -> String {
    use rand::Rng;
    let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("TRX{}{:04}", now_millis(), suffix)
}
