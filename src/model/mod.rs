pub mod candle;
pub mod level;
