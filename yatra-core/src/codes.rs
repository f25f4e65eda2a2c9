use rand::Rng;

/// Generate a PNR: a 13-digit numeric string, uniform in [10^12, 10^13 - 1].
///
/// Uniqueness is the ledger's responsibility; callers must check-and-retry
/// against existing records.
pub fn new_pnr() -> String {
    let number: u64 = rand::thread_rng().gen_range(1_000_000_000_000..10_000_000_000_000);
    number.to_string()
}

/// Generate a 6-digit OTP code, leading zeros preserved
pub fn new_otp() -> String {
    let number: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{:06}", number)
}
