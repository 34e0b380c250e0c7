pub mod git_checkout;
