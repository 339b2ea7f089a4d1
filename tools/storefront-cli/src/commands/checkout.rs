//! Checkout command.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context as _, Result};
use console::style;
use dialoguer::{Confirm, Input};
use indicatif::ProgressBar;
use storefront_commerce::checkout::{
    CheckoutCoordinator, CheckoutOutcome, CheckoutView, FormField, Notification,
    NotificationLevel, OrderForm, PlacedOrder, ValidationRules,
};

use super::CheckoutArgs;
use crate::context::Context;
use crate::output::Output;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;

    if cart.is_empty() {
        bail!("Your cart is empty. Add something with `storefront cart add <id>`.");
    }

    super::cart::show(&cart, ctx);

    let form = match &args.form {
        Some(path) => load_form(Path::new(path))?,
        None if ctx.output.is_interactive() => prompt_form()?,
        None => bail!("No terminal to prompt on. Pass the shipping form with --form <file>."),
    };

    if !args.yes && ctx.output.is_interactive() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", cart.summary().total))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let view = SpinnerView::new(ctx.output.clone());
    let mut checkout = CheckoutCoordinator::new(ctx.catalog()?, view)
        .with_timings(ctx.config.checkout.timings());
    checkout.set_payment_method(
        args.payment_method
            .clone()
            .unwrap_or_else(|| ctx.config.checkout.payment_method.clone()),
    );

    let outcome = checkout.handle_checkout(&mut cart, &form).await;
    checkout.view().settle().await;

    match outcome {
        CheckoutOutcome::Placed(placed) => {
            if ctx.output.is_json() {
                ctx.output.json(&placed.order);
                return Ok(());
            }
            print_confirmation(&placed, checkout.shipping_address(), &ctx.output);
            Ok(())
        }
        CheckoutOutcome::InvalidForm(errors) => {
            for (field, error) in errors.iter() {
                ctx.output.error(&format!("{}: {}", field.label(), error));
            }
            bail!("Order not placed")
        }
        CheckoutOutcome::EmptyCart | CheckoutOutcome::Failed { .. } => {
            bail!("Order not placed; your cart was kept")
        }
    }
}

/// Read the shipping form from a TOML or JSON file.
fn load_form(path: &Path) -> Result<OrderForm> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read form file: {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON form: {}", path.display()))
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML form: {}", path.display()))
    }
}

/// Ask for each field, re-prompting until the value passes its rule.
fn prompt_form() -> Result<OrderForm> {
    let rules = ValidationRules::standard();
    let mut form = OrderForm::default();

    for field in FormField::ALL {
        let value: String = Input::new()
            .with_prompt(field.label())
            .validate_with(|input: &String| -> Result<(), String> {
                rules.check(field, input).map_err(|e| e.to_string())
            })
            .interact_text()?;
        *form.value_mut(field) = value;
    }

    Ok(form)
}

fn print_confirmation(placed: &PlacedOrder, shipping_address: Option<String>, output: &Output) {
    output.header("Order Confirmed");
    output.success(
        placed
            .message
            .as_deref()
            .unwrap_or("Thank you for your order!"),
    );
    output.kv("Order", &style(placed.order_id.as_str()).bold().to_string());
    output.kv(
        "Placed",
        &placed
            .order
            .order_date
            .with_timezone(&chrono::Local)
            .format("%B %-d, %Y %H:%M")
            .to_string(),
    );
    output.kv("Items", &placed.order.item_count().to_string());
    output.kv("Total", &placed.order.total.to_string());
    output.kv("Payment", &placed.order.payment_method);
    if let Some(address) = shipping_address {
        output.kv("Ship to", &address);
    }
}

/// Terminal side of the checkout: a spinner while the order is submitted,
/// notifications printed above it.
///
/// The coordinator asks for delayed UI changes; they are applied by
/// [`SpinnerView::settle`] once the attempt has finished.
struct SpinnerView {
    output: Output,
    spinner: ProgressBar,
    hide_after: Mutex<Option<Duration>>,
    confirm_after: Mutex<Option<Duration>>,
}

impl SpinnerView {
    fn new(output: Output) -> Self {
        let spinner = output.spinner();
        Self {
            output,
            spinner,
            hide_after: Mutex::new(None),
            confirm_after: Mutex::new(None),
        }
    }

    /// Wait out the requested delays, then clear the spinner.
    async fn settle(&self) {
        let hide = take(&self.hide_after);
        let confirm = take(&self.confirm_after);

        if let Some(hide) = hide {
            tokio::time::sleep(hide).await;
        }
        self.spinner.finish_and_clear();

        if let Some(confirm) = confirm {
            tokio::time::sleep(confirm.saturating_sub(hide.unwrap_or_default())).await;
        }
    }
}

fn take(slot: &Mutex<Option<Duration>>) -> Option<Duration> {
    slot.lock().ok().and_then(|mut slot| slot.take())
}

fn put(slot: &Mutex<Option<Duration>>, value: Duration) {
    if let Ok(mut slot) = slot.lock() {
        *slot = Some(value);
    }
}

impl CheckoutView for SpinnerView {
    fn notify(&self, notification: Notification) {
        self.spinner.suspend(|| match notification.level {
            NotificationLevel::Success => self.output.success(&notification.message),
            NotificationLevel::Error => self.output.error(&notification.message),
        });
    }

    fn show_loading(&self) {
        self.output.start_spinner(&self.spinner, "Processing your order...");
    }

    fn hide_loading(&self, after: Duration) {
        put(&self.hide_after, after);
    }

    fn show_confirmation(&self, _order: &PlacedOrder, after: Duration) {
        self.spinner.set_message("Order placed");
        put(&self.confirm_after, after);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_form_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.toml");
        std::fs::write(
            &path,
            r#"
fullName = "Jane Doe"
email = "jane@example.com"
phone = "5551234567"
address = "12 Main St"
city = "Springfield"
state = "IL"
zip = "62701"
"#,
        )
        .unwrap();

        let form = load_form(&path).unwrap();
        assert_eq!(form.full_name, "Jane Doe");
        assert_eq!(form.zip, "62701");
    }

    #[test]
    fn test_load_form_json_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, r#"{"fullName": "Jane Doe", "email": "jane@example.com"}"#)
            .unwrap();

        let form = load_form(&path).unwrap();
        assert_eq!(form.email, "jane@example.com");
        assert!(form.city.is_empty());
    }

    #[test]
    fn test_load_form_missing_file() {
        let err = load_form(Path::new("/nonexistent/form.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read form file"));
    }

    #[tokio::test]
    async fn test_view_settles_delays() {
        let view = SpinnerView::new(Output::new(false, true));
        view.show_loading();
        view.hide_loading(Duration::from_millis(5));
        view.notify(Notification::error("declined"));

        view.settle().await;
        assert!(take(&view.hide_after).is_none());
        assert!(take(&view.confirm_after).is_none());
    }
}
