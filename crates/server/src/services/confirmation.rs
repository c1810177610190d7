//! Order confirmation rendering.
//!
//! Renders the multipart confirmation email from Askama templates at
//! checkout time; the rendered bodies are stored in the outbox and sent
//! verbatim later.

use askama::Template;
use rust_decimal::Decimal;

use crate::services::checkout::ShippingAddress;

/// Subject line for every confirmation email.
pub const CONFIRMATION_SUBJECT: &str = "Your Order Confirmation";

/// One line in the confirmation item table.
pub struct ConfirmationLine {
    /// Product name.
    pub name: String,
    /// Size suffix, empty for unsized products.
    pub size: String,
    /// Units bought.
    pub quantity: i32,
    /// Line total at the frozen price.
    pub line_total: Decimal,
}

/// HTML template for the order confirmation email.
#[derive(Template)]
#[template(path = "email/order_confirmation.html")]
struct OrderConfirmationHtml<'a> {
    buyer_name: &'a str,
    shipping: &'a ShippingAddress,
    items: &'a [ConfirmationLine],
    new_balance: Decimal,
    base_url: &'a str,
}

/// Plain text template for the order confirmation email.
#[derive(Template)]
#[template(path = "email/order_confirmation.txt")]
struct OrderConfirmationText<'a> {
    buyer_name: &'a str,
    shipping: &'a ShippingAddress,
    items: &'a [ConfirmationLine],
    new_balance: Decimal,
    base_url: &'a str,
}

/// A fully rendered confirmation message, ready to enqueue.
pub struct ConfirmationEmail {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Render both bodies of the confirmation email.
///
/// # Errors
///
/// Returns `askama::Error` if either template fails to render; checkout
/// logs that and skips the email rather than aborting.
pub fn render(
    buyer_name: &str,
    shipping: &ShippingAddress,
    items: &[ConfirmationLine],
    new_balance: Decimal,
    base_url: &str,
) -> Result<ConfirmationEmail, askama::Error> {
    let html = OrderConfirmationHtml {
        buyer_name,
        shipping,
        items,
        new_balance,
        base_url,
    }
    .render()?;
    let text = OrderConfirmationText {
        buyer_name,
        shipping,
        items,
        new_balance,
        base_url,
    }
    .render()?;

    Ok(ConfirmationEmail {
        subject: CONFIRMATION_SUBJECT.to_string(),
        text_body: text,
        html_body: html,
    })
}
