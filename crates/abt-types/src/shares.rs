/// Non-negative integer share count. A-share lot size is 100 for BUY orders;
/// SELL orders may dispose of odd lots.
pub type ShareCount = i64;

/// Default exchange lot size.
pub const DEFAULT_LOT_SIZE: ShareCount = 100;

/// Rounds `qty` down to the nearest multiple of `lot_size`.
pub fn floor_to_lot(qty: ShareCount, lot_size: ShareCount) -> ShareCount {
    if lot_size <= 0 {
        return qty;
    }
    (qty / lot_size) * lot_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_to_lot_rounds_down() {
        assert_eq!(floor_to_lot(1050, 100), 1000);
        assert_eq!(floor_to_lot(99, 100), 0);
        assert_eq!(floor_to_lot(1500, 100), 1500);
    }
}
