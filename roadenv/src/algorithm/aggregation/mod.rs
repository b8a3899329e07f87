mod attribute_aggregator;

pub use attribute_aggregator::AttributeAggregator;
