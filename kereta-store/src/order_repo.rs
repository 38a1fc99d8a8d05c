use async_trait::async_trait;
use tokio::sync::RwLock;
use kereta_core::repository::OrderRepository;
use kereta_core::{CoreError, CoreResult};
use kereta_order::{Order, OrderStatus};
use kereta_shared::PassengerInfo;

/// Process-lifetime order list. Writers serialize on the lock, so concurrent
/// bookings are all kept and keep their arrival order.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository holding the sample booking shown to first-time users
    pub fn with_demo_order() -> Self {
        Self {
            orders: RwLock::new(vec![demo_order()]),
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: Order) -> CoreResult<()> {
        let mut orders = self.orders.write().await;
        if orders.iter().any(|o| o.id == order.id) {
            return Err(CoreError::Conflict(format!("Order {} already exists", order.id)));
        }
        orders.push(order);
        tracing::debug!("Order count: {}", orders.len());
        Ok(())
    }

    async fn get(&self, order_id: &str) -> CoreResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.id == order_id).cloned())
    }

    async fn list(&self) -> CoreResult<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }
}

fn demo_order() -> Order {
    Order {
        id: "TRX1722784264".to_string(),
        is_alternative: false,
        train_id: Some("KAI001".to_string()),
        train_name: "Argo Bromo Anggrek".to_string(),
        origin: "Jakarta".to_string(),
        destination: "Surabaya".to_string(),
        date: "2024-08-15".to_string(),
        time: Some("08:00".to_string()),
        passengers: 1,
        price: 500000,
        status: OrderStatus::Confirmed,
        passengers_info: vec![PassengerInfo::new("John Doe", "1234567890")],
        refund_status: None,
        legs: Vec::new(),
    }
}
