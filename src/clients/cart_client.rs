use crate::cart_actor::{CartAction, CartError, LineChange};
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, StateClient};
use crate::model::{Cart, ProductId};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the cart actor.
///
/// Stock checks and persistence happen inside the actor; this type only
/// builds actions and forwards them.
#[derive(Clone)]
pub struct CartClient {
    inner: StateClient<Cart>,
}

impl CartClient {
    pub fn new(inner: StateClient<Cart>) -> Self {
        Self { inner }
    }

    /// Adds one unit of `product_id`, inserting the line if needed.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<LineChange, CartError> {
        debug!("Sending request");
        self.inner
            .perform_action(CartAction::AddProduct(product_id))
            .await
    }

    /// Removes one unit of `product_id`.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<LineChange, CartError> {
        debug!("Sending request");
        self.inner
            .perform_action(CartAction::RemoveProduct(product_id))
            .await
    }

    #[instrument(skip_all, fields(product_id = %product_id, amount = amount))]
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<LineChange, CartError> {
        debug!("Sending request");
        self.inner
            .perform_action(CartAction::UpdateProductAmount { product_id, amount })
            .await
    }

    /// The current committed cart.
    pub async fn cart(&self) -> Result<Cart, CartError> {
        self.get().await
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &StateClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CartError::Framework(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, expect_get, MockClient};
    use crate::model::{CartItem, Product};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_update_sends_signed_amount() {
        let (generic, mut receiver) = create_mock_client(10, Cart::new());
        let client = CartClient::new(generic);

        let task = tokio::spawn(async move { client.update_product_amount(ProductId(3), -2).await });

        let (action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(
            action,
            CartAction::UpdateProductAmount {
                product_id: ProductId(3),
                amount: -2
            }
        );
        let _ = responder.send(Err(CartError::InvalidAmount {
            product_id: ProductId(3),
            amount: -2,
        }));

        assert!(matches!(
            task.await.unwrap(),
            Err(CartError::InvalidAmount { amount: -2, .. })
        ));
    }

    #[tokio::test]
    async fn test_cart_reads_committed_state() {
        let (generic, mut receiver) = create_mock_client(10, Cart::new());
        let client = CartClient::new(generic);
        let committed = Cart::from_items(vec![CartItem::new(
            Product::new(1u32, "Runner", Decimal::new(9990, 2), ""),
            2,
        )]);

        let expected = committed.clone();
        let task = tokio::spawn(async move { client.cart().await });
        let responder = expect_get(&mut receiver).await.expect("Expected Get request");
        let _ = responder.send(committed);

        assert_eq!(task.await.unwrap().unwrap(), expected);
    }

    #[tokio::test]
    async fn test_with_expectations() {
        let mut mock = MockClient::new(Cart::new());
        mock.expect_action().return_ok(LineChange {
            product_id: ProductId(1),
            amount: 1,
        });
        mock.expect_action()
            .return_err(CartError::NotInCart(ProductId(2)));

        let client = CartClient::new(mock.client());
        assert_eq!(client.add_product(ProductId(1)).await.unwrap().amount, 1);
        assert!(matches!(
            client.remove_product(ProductId(2)).await,
            Err(CartError::NotInCart(ProductId(2)))
        ));

        mock.verify();
    }

    #[tokio::test]
    async fn test_stopped_actor_maps_to_framework_error() {
        let (generic, receiver) = create_mock_client(1, Cart::new());
        drop(receiver);
        let client = CartClient::new(generic);

        assert!(matches!(
            client.cart().await,
            Err(CartError::Framework(FrameworkError::ActorClosed))
        ));
        assert!(matches!(
            client.add_product(ProductId(1)).await,
            Err(CartError::Framework(FrameworkError::ActorClosed))
        ));
    }
}
