/// Placeholder shown instead of monetary figures when balances are hidden
pub const MASK: &str = "••••••";

/// Format a USD amount as `$1,234.56` (negative as `-$1,234.56`)
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    format!("{}${}.{:02}", sign, group_thousands(whole), fraction)
}

/// Format a monetary value, or the mask when balances are hidden
pub fn format_masked(value: f64, hidden: bool) -> String {
    if hidden {
        MASK.to_string()
    } else {
        format_currency(value)
    }
}

/// Signed percentage with two decimals: `+1.23%`, `-0.50%`
pub fn format_percent(value: f64) -> String {
    format!("{}{:.2}%", if value >= 0.0 { "+" } else { "" }, value)
}

/// Compact large figure: `$1.28T`, `$89.20B`, `$12.50M`
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("${:.2}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else {
        format_currency(value)
    }
}

/// Truncate a string to a maximum length
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(",")
}
