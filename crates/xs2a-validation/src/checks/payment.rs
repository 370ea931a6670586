//! Payment path and cancellation checks.

use xs2a_core::{CommonPayment, MessageError, MessageErrorCode, ServiceType};

use crate::objects::PaymentRequestPath;

/// The payment type and product in the request path must match the
/// payment addressed.
pub fn check_payment_path(
    payment: &CommonPayment,
    path: &PaymentRequestPath,
) -> Result<(), MessageError> {
    if payment.payment_type != path.payment_type {
        return Err(MessageError::of(
            ServiceType::Pis,
            MessageErrorCode::ServiceInvalid405,
        ));
    }
    if payment.payment_product != path.payment_product {
        return Err(MessageError::of(
            ServiceType::Pis,
            MessageErrorCode::ProductInvalidForPayment,
        ));
    }
    Ok(())
}

/// A payment in a final transaction status cannot be cancelled.
pub fn check_payment_cancellable(payment: &CommonPayment) -> Result<(), MessageError> {
    if payment.transaction_status.is_finalised() {
        Err(MessageError::of(
            ServiceType::Pis,
            MessageErrorCode::CancellationInvalid,
        ))
    } else {
        Ok(())
    }
}
