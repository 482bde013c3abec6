use std::time::Duration;

use anyhow::{Result, bail};
use mervolt_form::{Field, FormController, HttpTransport, SubmitOutcome};

/// Post one submission to a running relay through the form controller.
pub async fn submit(
    endpoint: String,
    name: String,
    phone: String,
    message: String,
    timeout: Duration,
) -> Result<()> {
    let transport = HttpTransport::new(endpoint, Some(timeout))?;
    tracing::info!(endpoint = transport.endpoint(), "Submitting contact form");

    let controller = FormController::new(transport);
    controller.update_field(Field::Name, name);
    controller.update_field(Field::Phone, phone);
    controller.update_field(Field::Message, message);

    match controller.submit().await {
        SubmitOutcome::Sent => {
            tracing::info!("Message sent");
            Ok(())
        }
        SubmitOutcome::Failed => {
            let status = controller.status();
            bail!("{}", status.error().unwrap_or("submission failed"))
        }
        SubmitOutcome::AlreadyInFlight => bail!("a submission is already in flight"),
    }
}
