/// Reads the credit-hours field the way the form always has: leading digits
/// win, anything unreadable becomes 0.
pub fn parse_credit_hours(input: &str) -> u32 {
    let digits: String = input
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
