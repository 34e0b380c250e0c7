pub mod repository_checkout;
