//! End-to-end checkout flow: cart, discounts, pricing, submission, and the all-or-nothing
//! guarantees around payment and persistence.

use std::sync::Arc;

use testresult::TestResult;
use trellis::{
    cart::{Cart, CartLine},
    checkout::{Checkout, ShippingInfo},
    gateway::{MockPaymentGateway, PaymentConfirmation, PaymentGateway, PaymentIntent},
    metrics::NullMetrics,
    newsletter::{InMemoryNewsletter, NewsletterDirectory},
    orders::{
        errors::CheckoutError,
        models::CustomerId,
        repository::{InMemoryInventory, InMemoryOrdersRepository, OrdersRepository},
        service::{CheckoutService, StorefrontCheckoutService},
        status::OrderStatus,
    },
    receipt::Receipt,
};

fn shipping_info() -> ShippingInfo {
    ShippingInfo {
        name: "Ayu Lestari".to_string(),
        phone: "+62 812 0000 0000".to_string(),
        address: "Jl. Kebon Jeruk No. 7".to_string(),
        city: "Jakarta".to_string(),
        postal_code: "11530".to_string(),
        province: "DKI Jakarta".to_string(),
    }
}

fn monstera(quantity: u32) -> CartLine {
    CartLine {
        product_id: "monstera-deliciosa".to_string(),
        name: "Monstera Deliciosa".to_string(),
        unit_price: 50_000,
        quantity,
    }
}

fn checkout_with_selections() -> Checkout {
    let mut cart = Cart::new();
    cart.add(monstera(2)).expect("non-zero quantity");

    let mut checkout = Checkout::new(cart);
    checkout.select_shipping("regular").expect("catalog entry");
    checkout.select_payment("bca").expect("catalog entry");

    checkout
}

struct TestStore {
    orders: Arc<InMemoryOrdersRepository>,
    inventory: Arc<InMemoryInventory>,
    service: StorefrontCheckoutService,
}

async fn test_store(gateway: Arc<dyn PaymentGateway>) -> TestStore {
    let orders = Arc::new(InMemoryOrdersRepository::new());
    let inventory = Arc::new(InMemoryInventory::new());

    inventory.set_stock("monstera-deliciosa", 100).await;
    inventory.set_stock("snake-plant", 100).await;

    let service = StorefrontCheckoutService::new(
        orders.clone(),
        inventory.clone(),
        gateway,
        Arc::new(NullMetrics),
    );

    TestStore {
        orders,
        inventory,
        service,
    }
}

fn approving_gateway() -> Arc<dyn PaymentGateway> {
    let mut gateway = MockPaymentGateway::new();

    gateway.expect_create_payment_intent().returning(|request| {
        assert_eq!(request.currency, "idr");

        Ok(PaymentIntent {
            id: "pi_approved".to_string(),
            client_secret: "pi_approved_secret".to_string(),
            status: "requires_confirmation".to_string(),
        })
    });

    gateway.expect_confirm_payment().returning(|_| {
        Ok(PaymentConfirmation {
            success: true,
            error: None,
        })
    });

    Arc::new(gateway)
}

#[tokio::test]
async fn quote_progression_through_discount_changes() -> TestResult {
    let mut checkout = checkout_with_selections();

    // No discount.
    let base = checkout.quote();
    assert_eq!(base.subtotal, 100_000);
    assert_eq!(base.tax, 11_000);
    assert_eq!(base.total, 126_000);

    // Manual 10% code.
    checkout.apply_discount_code("WELCOME10")?;
    assert_eq!(checkout.quote().discount, 10_000);
    assert_eq!(checkout.quote().total, 116_000);

    // Invalid code changes nothing.
    assert!(checkout.apply_discount_code("FOOBAR").is_err());
    assert_eq!(checkout.quote().total, 116_000);

    Ok(())
}

#[tokio::test]
async fn newsletter_discount_applies_and_is_replaced_without_stacking() -> TestResult {
    let directory = InMemoryNewsletter::new();
    let customer = CustomerId::new();
    directory.subscribe(customer);

    let mut checkout = checkout_with_selections();

    checkout.apply_newsletter_discount(directory.is_subscribed(&customer));
    assert_eq!(checkout.quote().discount, 5_000);
    assert_eq!(checkout.quote().total, 121_000);

    // Re-applying does not stack.
    checkout.apply_newsletter_discount(directory.is_subscribed(&customer));
    assert_eq!(checkout.quote().total, 121_000);

    // A manual code replaces the newsletter rate: 20%, not 25%.
    checkout.apply_discount_code("PLANT20")?;
    assert_eq!(checkout.quote().discount, 20_000);
    assert_eq!(checkout.quote().total, 106_000);

    Ok(())
}

#[tokio::test]
async fn placing_an_order_snapshots_cart_and_clears_it() -> TestResult {
    let store = test_store(Arc::new(MockPaymentGateway::new())).await;
    let customer = CustomerId::new();

    let mut checkout = checkout_with_selections();
    checkout.apply_discount_code("WELCOME10")?;

    let order = store
        .service
        .place_order(Some(customer), &mut checkout, shipping_info())
        .await?;

    assert_eq!(order.pricing.total, 116_000);
    assert_eq!(order.discount_code.as_deref(), Some("WELCOME10"));
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(order.number.as_str().starts_with("ORD-"));
    assert!(order.number.as_str().ends_with("-0001"));
    assert!(checkout.cart().is_empty());

    // Mutating the live cart afterwards does not touch the stored order.
    checkout.cart_mut().add(monstera(5))?;
    checkout.cart_mut().set_quantity("monstera-deliciosa", 9)?;

    let stored = store.orders.get_order(order.id).await?;

    assert_eq!(stored.lines.len(), 1);
    assert_eq!(stored.lines[0].quantity, 2);
    assert_eq!(stored.pricing, order.pricing);

    Ok(())
}

#[tokio::test]
async fn order_numbers_increment_within_the_year() -> TestResult {
    let store = test_store(Arc::new(MockPaymentGateway::new())).await;
    let customer = CustomerId::new();

    let mut first = checkout_with_selections();
    let mut second = checkout_with_selections();

    let order_1 = store
        .service
        .place_order(Some(customer), &mut first, shipping_info())
        .await?;
    let order_2 = store
        .service
        .place_order(Some(customer), &mut second, shipping_info())
        .await?;

    assert!(order_1.number.as_str().ends_with("-0001"));
    assert!(order_2.number.as_str().ends_with("-0002"));
    assert_ne!(order_1.id, order_2.id);

    Ok(())
}

#[tokio::test]
async fn card_payment_confirms_through_the_gateway() -> TestResult {
    let store = test_store(approving_gateway()).await;
    let customer = CustomerId::new();

    let mut checkout = checkout_with_selections();
    checkout.select_payment("stripe")?;

    let order = store
        .service
        .place_order(Some(customer), &mut checkout, shipping_info())
        .await?;

    // Card payments carry no handling fee.
    assert_eq!(order.pricing.payment_fee, 0);
    assert_eq!(order.pricing.total, 126_000);
    assert_eq!(store.inventory.stock_of("monstera-deliciosa").await, Some(98));

    Ok(())
}

#[tokio::test]
async fn declined_payment_leaves_no_trace() -> TestResult {
    let mut gateway = MockPaymentGateway::new();

    gateway.expect_create_payment_intent().returning(|_| {
        Ok(PaymentIntent {
            id: "pi_declined".to_string(),
            client_secret: "pi_declined_secret".to_string(),
            status: "requires_confirmation".to_string(),
        })
    });

    gateway.expect_confirm_payment().returning(|_| {
        Ok(PaymentConfirmation {
            success: false,
            error: Some("Insufficient funds".to_string()),
        })
    });

    let store = test_store(Arc::new(gateway)).await;
    let customer = CustomerId::new();

    let mut checkout = checkout_with_selections();
    checkout.select_payment("stripe")?;

    let result = store
        .service
        .place_order(Some(customer), &mut checkout, shipping_info())
        .await;

    match result {
        Err(CheckoutError::PaymentFailed(message)) => assert_eq!(message, "Insufficient funds"),
        other => panic!("expected PaymentFailed, got {other:?}"),
    }

    // No order, untouched cart, untouched stock: the customer can retry.
    assert!(store.orders.orders_for_customer(customer).await?.is_empty());
    assert_eq!(checkout.cart().len(), 1);
    assert_eq!(store.inventory.stock_of("monstera-deliciosa").await, Some(100));

    Ok(())
}

#[tokio::test]
async fn order_history_is_scoped_to_the_customer() -> TestResult {
    let store = test_store(Arc::new(MockPaymentGateway::new())).await;
    let alice = CustomerId::new();
    let bob = CustomerId::new();

    let mut checkout = checkout_with_selections();
    store
        .service
        .place_order(Some(alice), &mut checkout, shipping_info())
        .await?;

    let alice_orders = store.service.orders_for_customer(alice).await?;
    let bob_orders = store.service.orders_for_customer(bob).await?;

    assert_eq!(alice_orders.len(), 1);
    assert!(bob_orders.is_empty());

    Ok(())
}

#[tokio::test]
async fn placed_order_renders_a_receipt() -> TestResult {
    let store = test_store(Arc::new(MockPaymentGateway::new())).await;

    let mut checkout = checkout_with_selections();
    checkout.apply_discount_code("WELCOME10")?;

    let order = store
        .service
        .place_order(Some(CustomerId::new()), &mut checkout, shipping_info())
        .await?;

    let text = Receipt::new(&order).text()?;

    assert!(text.contains(order.number.as_str()));
    assert!(text.contains("Monstera Deliciosa"));
    assert!(text.contains("Discount (WELCOME10):"));

    Ok(())
}
