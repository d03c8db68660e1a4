//! Page flows across several services sharing one set of collections.

use std::sync::Arc;
use std::time::Duration;

use courier_ops::app::pages::dashboard::{fetch_summary, RECENT_ORDER_COUNT};
use courier_ops::app::pages::routes::UNKNOWN_DRIVER;
use courier_ops::app::pages::{
    BookingStep, BookingWizard, OrdersPage, RoutesPage, TrackingPage,
};
use courier_ops::app::{Loadable, Notices};
use courier_ops::storage::FixedLatency;
use courier_ops::{Fixtures, ServiceContext, Services};

#[tokio::test]
async fn dashboard_summary_lists_newest_orders_first() {
    let services = Services::immediate().unwrap();
    let summary = fetch_summary(&services).await.unwrap();

    assert_eq!(summary.recent_orders.len(), RECENT_ORDER_COUNT);
    assert_eq!(summary.cards.len(), 4);
    let drivers: usize = summary.driver_counts.iter().map(|c| c.count).sum();
    assert_eq!(drivers, 5);
}

#[tokio::test]
async fn search_without_matches_offers_to_clear() {
    let page = OrdersPage::new(Services::immediate().unwrap(), Notices::new());
    page.load().await;

    page.set_query("zzz-no-such-customer");
    assert!(page.visible().is_empty());
    let empty = page.empty_state().unwrap();
    assert_eq!(empty.title, "No orders match your search");

    page.clear_search();
    assert!(page.empty_state().is_none());
    assert_eq!(page.visible().len(), 8);
}

#[tokio::test(start_paused = true)]
async fn unmounting_mid_load_discards_the_result() {
    let ctx = ServiceContext::new(
        Arc::new(FixedLatency(Duration::from_millis(500))),
        Arc::new(courier_ops::infrastructure::SystemClock),
    );
    let services = Services::from_fixtures(Fixtures::bundled().unwrap(), &ctx);
    let page = OrdersPage::new(services, Notices::new());

    tokio::join!(page.load(), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(page.state().is_loading());
        page.unmount();
    });

    assert!(matches!(page.state(), Loadable::Loading));
    assert!(page.visible().is_empty());
}

#[tokio::test]
async fn tasks_of_unknown_drivers_are_grouped_apart() {
    let page = RoutesPage::new(Services::immediate().unwrap(), Notices::new());
    page.load().await;

    let groups = page.groups();
    let unknown = groups
        .iter()
        .find(|g| g.driver_name == UNKNOWN_DRIVER)
        .unwrap();
    assert!(unknown.tasks.iter().all(|t| t.driver_id == "99"));
}

#[tokio::test]
async fn booked_orders_can_be_tracked() {
    let services = Services::immediate().unwrap();
    let notices = Notices::new();

    let mut wizard = BookingWizard::new(services.clone(), notices.clone());
    wizard.form.customer_name = "Priya Natarajan".into();
    wizard.form.customer_phone = "(415) 555-0142".into();
    assert!(wizard.next().await);
    wizard.form.pickup_address.street = "88 King St".into();
    wizard.form.delivery_address.street = "1 Ferry Building".into();
    assert!(wizard.next().await);
    wizard.form.package.weight = "4.5".into();
    assert!(wizard.next().await);
    assert_eq!(wizard.step(), BookingStep::Review);

    let order = wizard.submit().await.unwrap();
    assert!(order.tracking_number.starts_with("TRK"));

    let tracking = TrackingPage::new(services.clone(), notices.clone());
    tracking.track(&order.tracking_number.to_lowercase()).await;
    let state = tracking.state();
    let result = state.ready().unwrap();
    assert_eq!(result.order.customer_name, "Priya Natarajan");
    assert!(result.tasks.is_empty());
    assert!(result.timeline[0].completed);
    assert!(!result.timeline[1].completed);

    let orders = OrdersPage::new(services, notices);
    orders.load().await;
    orders.set_query("natarajan");
    assert_eq!(orders.visible().len(), 1);
}
