//! The shipment record and its tabular columns.
//!
//! A [`ShipmentRecord`] is built once per generated shipment and never
//! modified. [`Column`] names every output column in raw-table order and
//! knows how to read its [`Cell`] from a record, so the writer can serialize
//! any projection of columns without touching values.

use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Delivery outcome relative to the promised time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryStatus {
    Delivered,
    Delayed,
    Early,
}

impl DeliveryStatus {
    /// Late by more than half a day.
    pub const DELAY_THRESHOLD_DAYS: f64 = 0.5;

    /// Classify a signed delay in days.
    pub fn from_delay(delay_days: f64) -> Self {
        if delay_days > Self::DELAY_THRESHOLD_DAYS {
            DeliveryStatus::Delayed
        } else if delay_days < -Self::DELAY_THRESHOLD_DAYS {
            DeliveryStatus::Early
        } else {
            DeliveryStatus::Delivered
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeliveryStatus::Delivered => "Delivered",
            DeliveryStatus::Delayed => "Delayed",
            DeliveryStatus::Early => "Early",
        }
    }

    pub fn is_on_time(self) -> bool {
        self != DeliveryStatus::Delayed
    }
}

/// One generated shipment.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentRecord {
    // === Identity and dates ===
    pub shipment_id: String,
    pub order_date: NaiveDate,
    pub shipment_date: NaiveDate,
    pub actual_delivery_date: NaiveDate,

    // === Parties and route ===
    pub origin_city: &'static str,
    pub origin_country: &'static str,
    pub manufacturing_site: &'static str,
    pub destination_country: &'static str,
    pub destination_city: &'static str,
    pub route_name: &'static str,
    pub distance_km: f64,
    pub customer_id: String,
    pub service_level: &'static str,

    // === Goods ===
    pub product_id: String,
    pub product_category: &'static str,
    pub content_type: &'static str,
    pub packaging_type: &'static str,
    pub packaging_efficiency: f64,
    pub quantity: u32,
    pub unit_price_usd: f64,
    pub pack_price_usd: f64,
    pub line_item_value_usd: f64,
    pub weight_kg: f64,
    pub volume_m3: f64,
    pub billable_weight_kg: f64,

    // === Carrier ===
    pub shipment_mode: &'static str,
    pub transporter: &'static str,
    pub carrier_fit_score: u8,

    // === Timing ===
    pub expected_delivery_days: f64,
    pub actual_delivery_days: f64,
    pub delay_days: f64,
    pub avg_speed_kph: f64,
    pub halt_hours: f64,
    pub route_deviation: f64,
    pub weather: &'static str,
    pub customs_delay_hours: f64,
    pub congestion_factor: f64,
    pub seasonal_cost_factor: f64,
    pub seasonal_delay_factor: f64,

    // === Cost and outcome ===
    pub proposed_cost_usd: f64,
    pub actual_cost_usd: f64,
    pub cost_per_billable_kg_usd: f64,
    pub price_variance_usd: f64,
    pub price_variance_pct: f64,
    pub carbon_emissions_kg: f64,
    pub status: DeliveryStatus,
    pub is_cost_outlier: bool,
}

impl ShipmentRecord {
    pub fn is_on_time(&self) -> bool {
        self.status.is_on_time()
    }

    /// Calendar month of the shipment date (1-12).
    pub fn shipment_month(&self) -> u32 {
        self.shipment_date.month()
    }

    /// Weekday of the shipment date, Monday = 0.
    pub fn shipment_day_of_week(&self) -> u32 {
        self.shipment_date.weekday().num_days_from_monday()
    }

    /// Value of one column for this record.
    pub fn cell(&self, column: Column) -> Cell<'_> {
        use Column::*;

        match column {
            ShipmentId => Cell::Text(&self.shipment_id),
            OrderDate => Cell::Date(self.order_date),
            ShipmentDate => Cell::Date(self.shipment_date),
            ActualDeliveryDate => Cell::Date(self.actual_delivery_date),
            OriginCity => Cell::Text(self.origin_city),
            OriginCountry => Cell::Text(self.origin_country),
            ManufacturingSite => Cell::Text(self.manufacturing_site),
            DestinationCountry => Cell::Text(self.destination_country),
            DestinationCity => Cell::Text(self.destination_city),
            RouteName => Cell::Text(self.route_name),
            DistanceKm => Cell::Int(self.distance_km as i64),
            CustomerId => Cell::Text(&self.customer_id),
            ServiceLevel => Cell::Text(self.service_level),
            ProductId => Cell::Text(&self.product_id),
            ProductCategory => Cell::Text(self.product_category),
            ContentType => Cell::Text(self.content_type),
            PackagingType => Cell::Text(self.packaging_type),
            PackagingEfficiency => Cell::Float(self.packaging_efficiency),
            Quantity => Cell::Int(i64::from(self.quantity)),
            UnitPrice => Cell::Float(self.unit_price_usd),
            PackPrice => Cell::Float(self.pack_price_usd),
            LineItemValue => Cell::Float(self.line_item_value_usd),
            WeightKg => Cell::Float(self.weight_kg),
            VolumeM3 => Cell::Float(self.volume_m3),
            BillableWeightKg => Cell::Float(self.billable_weight_kg),
            ShipmentMode => Cell::Text(self.shipment_mode),
            Transporter => Cell::Text(self.transporter),
            CarrierFitScore => Cell::Int(i64::from(self.carrier_fit_score)),
            ExpectedDeliveryDays => Cell::Float(self.expected_delivery_days),
            ActualDeliveryDays => Cell::Float(self.actual_delivery_days),
            DelayDays => Cell::Float(self.delay_days),
            AvgSpeed => Cell::Float(self.avg_speed_kph),
            HaltHours => Cell::Float(self.halt_hours),
            RouteDeviation => Cell::Float(self.route_deviation),
            Weather => Cell::Text(self.weather),
            CustomsDelayHours => Cell::Float(self.customs_delay_hours),
            CongestionFactor => Cell::Float(self.congestion_factor),
            SeasonalCostFactor => Cell::Float(self.seasonal_cost_factor),
            SeasonalDelayFactor => Cell::Float(self.seasonal_delay_factor),
            ProposedCost => Cell::Float(self.proposed_cost_usd),
            ActualCost => Cell::Float(self.actual_cost_usd),
            CostPerBillableKg => Cell::Float(self.cost_per_billable_kg_usd),
            PriceVariance => Cell::Float(self.price_variance_usd),
            PriceVariancePct => Cell::Float(self.price_variance_pct),
            CarbonEmissions => Cell::Float(self.carbon_emissions_kg),
            Status => Cell::Text(self.status.label()),
            OnTimeDelivery => Cell::Text(if self.is_on_time() { "Yes" } else { "No" }),
            CostOutlier => Cell::Bool(self.is_cost_outlier),
            ShipmentMonth => Cell::Int(i64::from(self.shipment_month())),
            ShipmentDayOfWeek => Cell::Int(i64::from(self.shipment_day_of_week())),
        }
    }
}

/// A single value in an output row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Bool(bool),
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) if s.contains(|c: char| matches!(c, ',' | '"' | '\n')) => {
                write!(f, "\"{}\"", s.replace('"', "\"\""))
            }
            Cell::Text(s) => f.write_str(s),
            Cell::Int(n) => write!(f, "{}", n),
            // Integral floats keep a trailing ".0" so the column stays float-typed
            Cell::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Cell::Float(x) => write!(f, "{}", x),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Cell::Bool(true) => f.write_str("True"),
            Cell::Bool(false) => f.write_str("False"),
        }
    }
}

/// Output columns in raw-table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    ShipmentId,
    OrderDate,
    ShipmentDate,
    ActualDeliveryDate,
    OriginCity,
    OriginCountry,
    ManufacturingSite,
    DestinationCountry,
    DestinationCity,
    RouteName,
    DistanceKm,
    CustomerId,
    ServiceLevel,
    ProductId,
    ProductCategory,
    ContentType,
    PackagingType,
    PackagingEfficiency,
    Quantity,
    UnitPrice,
    PackPrice,
    LineItemValue,
    WeightKg,
    VolumeM3,
    BillableWeightKg,
    ShipmentMode,
    Transporter,
    CarrierFitScore,
    ExpectedDeliveryDays,
    ActualDeliveryDays,
    DelayDays,
    AvgSpeed,
    HaltHours,
    RouteDeviation,
    Weather,
    CustomsDelayHours,
    CongestionFactor,
    SeasonalCostFactor,
    SeasonalDelayFactor,
    ProposedCost,
    ActualCost,
    CostPerBillableKg,
    PriceVariance,
    PriceVariancePct,
    CarbonEmissions,
    Status,
    OnTimeDelivery,
    CostOutlier,
    ShipmentMonth,
    ShipmentDayOfWeek,
}

impl Column {
    pub fn header(self) -> &'static str {
        use Column::*;

        match self {
            ShipmentId => "Shipment ID",
            OrderDate => "Order Date",
            ShipmentDate => "Shipment Date",
            ActualDeliveryDate => "Actual Delivery Date",
            OriginCity => "Origin City",
            OriginCountry => "Origin Country",
            ManufacturingSite => "Manufacturing Site",
            DestinationCountry => "Destination Country",
            DestinationCity => "Destination City",
            RouteName => "Chosen Route Name",
            DistanceKm => "Distance (km)",
            CustomerId => "Customer ID",
            ServiceLevel => "Service Level",
            ProductId => "Product ID",
            ProductCategory => "Product Category",
            ContentType => "Shipment Content Type",
            PackagingType => "Packaging Type",
            PackagingEfficiency => "Packaging Efficiency",
            Quantity => "Line Item Quantity",
            UnitPrice => "Unit Price (USD)",
            PackPrice => "Pack Price (USD)",
            LineItemValue => "Line Item Value (USD)",
            WeightKg => "Weight (kg)",
            VolumeM3 => "Volume (m³)",
            BillableWeightKg => "Billable Weight (kg)",
            ShipmentMode => "Shipment Mode",
            Transporter => "Transporter Name",
            CarrierFitScore => "Carrier Product Fit Score",
            ExpectedDeliveryDays => "Expected Delivery Time (Days)",
            ActualDeliveryDays => "Delivery Time (Days)",
            DelayDays => "Delay (Days)",
            AvgSpeed => "Avg Speed (km/h)",
            HaltHours => "Halt Duration (hours)",
            RouteDeviation => "Route Deviation Factor",
            Weather => "Weather Impact",
            CustomsDelayHours => "Customs/Border Delay (hours)",
            CongestionFactor => "Route Congestion Factor",
            SeasonalCostFactor => "Seasonal Cost Factor",
            SeasonalDelayFactor => "Seasonal Delay Factor",
            ProposedCost => "Proposed Freight Cost (USD)",
            ActualCost => "Actual Freight Cost (USD)",
            CostPerBillableKg => "Cost Per Billable Kg (USD)",
            PriceVariance => "Price Variance (USD)",
            PriceVariancePct => "Price Variance (%)",
            CarbonEmissions => "Carbon Emissions (kg CO2)",
            Status => "Status",
            OnTimeDelivery => "On-Time Delivery",
            CostOutlier => "Cost Outlier",
            ShipmentMonth => "Shipment Month",
            ShipmentDayOfWeek => "Shipment Day of Week",
        }
    }
}

/// Every column of the raw table.
pub const RAW_COLUMNS: [Column; 50] = {
    use Column::*;
    [
        ShipmentId,
        OrderDate,
        ShipmentDate,
        ActualDeliveryDate,
        OriginCity,
        OriginCountry,
        ManufacturingSite,
        DestinationCountry,
        DestinationCity,
        RouteName,
        DistanceKm,
        CustomerId,
        ServiceLevel,
        ProductId,
        ProductCategory,
        ContentType,
        PackagingType,
        PackagingEfficiency,
        Quantity,
        UnitPrice,
        PackPrice,
        LineItemValue,
        WeightKg,
        VolumeM3,
        BillableWeightKg,
        ShipmentMode,
        Transporter,
        CarrierFitScore,
        ExpectedDeliveryDays,
        ActualDeliveryDays,
        DelayDays,
        AvgSpeed,
        HaltHours,
        RouteDeviation,
        Weather,
        CustomsDelayHours,
        CongestionFactor,
        SeasonalCostFactor,
        SeasonalDelayFactor,
        ProposedCost,
        ActualCost,
        CostPerBillableKg,
        PriceVariance,
        PriceVariancePct,
        CarbonEmissions,
        Status,
        OnTimeDelivery,
        CostOutlier,
        ShipmentMonth,
        ShipmentDayOfWeek,
    ]
};

/// Columns of the processed table: dates, identifiers, and core
/// cost/time/weight metrics. Excludes packaging, congestion, seasonal
/// factors, outlier flag, and status.
pub const PROCESSED_COLUMNS: [Column; 30] = {
    use Column::*;
    [
        OrderDate,
        ShipmentDate,
        ActualDeliveryDate,
        OriginCity,
        OriginCountry,
        DestinationCountry,
        DestinationCity,
        RouteName,
        DistanceKm,
        CustomerId,
        ServiceLevel,
        ProductId,
        ProductCategory,
        ContentType,
        Quantity,
        UnitPrice,
        WeightKg,
        VolumeM3,
        BillableWeightKg,
        ShipmentMode,
        Transporter,
        CarrierFitScore,
        ExpectedDeliveryDays,
        AvgSpeed,
        HaltHours,
        Weather,
        CustomsDelayHours,
        ProposedCost,
        ActualCost,
        CostPerBillableKg,
    ]
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_status_thresholds() {
        assert_eq!(DeliveryStatus::from_delay(0.6), DeliveryStatus::Delayed);
        assert_eq!(DeliveryStatus::from_delay(0.5), DeliveryStatus::Delivered);
        assert_eq!(DeliveryStatus::from_delay(0.0), DeliveryStatus::Delivered);
        assert_eq!(DeliveryStatus::from_delay(-0.5), DeliveryStatus::Delivered);
        assert_eq!(DeliveryStatus::from_delay(-0.6), DeliveryStatus::Early);
    }

    #[test]
    fn test_on_time() {
        assert!(DeliveryStatus::Delivered.is_on_time());
        assert!(DeliveryStatus::Early.is_on_time());
        assert!(!DeliveryStatus::Delayed.is_on_time());
    }

    #[test]
    fn test_raw_columns_unique() {
        let headers: HashSet<&str> = RAW_COLUMNS.iter().map(|c| c.header()).collect();
        assert_eq!(headers.len(), RAW_COLUMNS.len());
    }

    #[test]
    fn test_processed_is_strict_subset() {
        let raw: HashSet<Column> = RAW_COLUMNS.iter().copied().collect();
        for column in PROCESSED_COLUMNS {
            assert!(raw.contains(&column));
        }
        assert!(PROCESSED_COLUMNS.len() < RAW_COLUMNS.len());

        for excluded in [
            Column::PackagingType,
            Column::PackagingEfficiency,
            Column::CongestionFactor,
            Column::SeasonalCostFactor,
            Column::SeasonalDelayFactor,
            Column::CostOutlier,
            Column::Status,
        ] {
            assert!(!PROCESSED_COLUMNS.contains(&excluded));
        }
    }

    #[test]
    fn test_cell_formatting() {
        assert_eq!(Cell::Float(1.0).to_string(), "1.0");
        assert_eq!(Cell::Float(12.34).to_string(), "12.34");
        assert_eq!(Cell::Int(1400).to_string(), "1400");
        assert_eq!(Cell::Bool(true).to_string(), "True");
        assert_eq!(Cell::Bool(false).to_string(), "False");
        assert_eq!(Cell::Text("Air/Sea Route NY").to_string(), "Air/Sea Route NY");
        assert_eq!(Cell::Text("a,b").to_string(), "\"a,b\"");

        let date = NaiveDate::from_ymd_opt(2023, 7, 4).unwrap();
        assert_eq!(Cell::Date(date).to_string(), "2023-07-04");
    }
}
