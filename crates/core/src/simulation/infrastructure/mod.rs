pub mod bouncing_ball;
