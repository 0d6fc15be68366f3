pub mod bling;
