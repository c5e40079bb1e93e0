//! Canonical string construction for the OnePay secure hash.
//!
//! Both the checkout signer and the return verifier feed parameters through
//! [`canonical_string`], so the two sides always hash identical bytes.
//!
//! Rules:
//! 1. keep only names starting with a reserved prefix (`vpc_`, `user_`)
//! 2. drop the hash parameter, other excluded names, and empty values
//! 3. sort names by byte value
//! 4. join `name=value` pairs with `&`, values verbatim

/// Which parameters take part in hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingRules {
    /// Name prefixes that mark a parameter as hashed.
    pub prefixes: &'static [&'static str],
    /// Name of the parameter carrying the secure hash.
    pub hash_param: &'static str,
    /// Prefixed names that are nevertheless left out of the hash.
    pub excluded: &'static [&'static str],
}

impl HashingRules {
    /// Rules shared by the OnePay domestic and international gateways.
    pub const ONEPAY: HashingRules = HashingRules {
        prefixes: &["vpc_", "user_"],
        hash_param: "vpc_SecureHash",
        excluded: &["vpc_SecureHashType"],
    };

    /// Returns true if a parameter with this name and value is hashed.
    pub fn is_hashed(&self, name: &str, value: &str) -> bool {
        !value.is_empty()
            && name != self.hash_param
            && !self.excluded.contains(&name)
            && self.prefixes.iter().any(|prefix| name.starts_with(prefix))
    }
}

/// Builds the canonical string for a set of parameters.
///
/// Input order does not matter. An input with no qualifying parameters
/// produces an empty string.
pub fn canonical_string<'a, I>(params: I, rules: &HashingRules) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut pairs: Vec<(&str, &str)> = params
        .into_iter()
        .filter(|(name, value)| rules.is_hashed(name, value))
        .collect();

    // Ordinal sort; OnePay sorts by byte value, not by locale collation.
    pairs.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    let mut canonical = String::new();
    for (i, (name, value)) in pairs.iter().enumerate() {
        if i > 0 {
            canonical.push('&');
        }
        canonical.push_str(name);
        canonical.push('=');
        canonical.push_str(value);
    }
    canonical
}
