//! Build stamp generated by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_is_populated() {
        assert!(!BUILD_COMMIT.is_empty());
        // YYYY-MM-DD, or "unknown" when stamped outside a checkout.
        assert!(BUILD_DATE.len() == 10 || BUILD_DATE == "unknown");
    }
}
