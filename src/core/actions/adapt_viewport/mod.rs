pub mod adapt_viewport;
