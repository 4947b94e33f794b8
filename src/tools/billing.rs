/// Issue a refund. Mock: nothing leaves the process.
pub fn refund(order_id: &str, amount: f64) -> String {
    format!("Refund issued for order {order_id}, amount ${amount:.2}.")
}

pub fn invoice_status(account_id: Option<&str>) -> String {
    let acct = account_id.unwrap_or("UNKNOWN");
    format!("Invoice status for {acct}: PAID on-time (mock).")
}
