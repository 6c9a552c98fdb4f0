//! The built-in indicator set for the China macro / A-share dashboard.
//!
//! Thresholds and fallbacks are the dashboard's long-standing calibration;
//! bands and interpretations are display text only.

use crate::domain::{Dimension, Direction, IndicatorDef, ScoringRule, SeriesSpec};

fn higher(good: f64, bad: f64) -> ScoringRule {
    ScoringRule::Linear {
        direction: Direction::HigherIsBetter,
        good,
        bad,
    }
}

fn lower(good: f64, bad: f64) -> ScoringRule {
    ScoringRule::Linear {
        direction: Direction::LowerIsBetter,
        good,
        bad,
    }
}

fn step(direction: Direction, threshold: f64, pass: f64, fail: f64) -> ScoringRule {
    ScoringRule::Step {
        direction,
        threshold,
        pass,
        fail,
    }
}

fn latest(series_id: &str) -> SeriesSpec {
    SeriesSpec::Latest {
        series_id: series_id.to_string(),
        scale: 1.0,
    }
}

/// Indicators in display order.
pub fn builtin_indicators() -> Vec<IndicatorDef> {
    vec![
        // Macro
        IndicatorDef::new("gdp_yoy", "GDP YoY (%)", Dimension::Macro, higher(5.0, 3.0))
            .fallback(4.0, 60.0)
            .bands(">5%", "<3%")
            .interpretation("Growth momentum of aggregate output; below 3% usually calls for strong policy support.")
            .series(latest("CN_GDP_YOY")),
        IndicatorDef::new("pmi_manufacturing", "Manufacturing PMI", Dimension::Macro, higher(55.0, 45.0))
            .fallback(50.0, 60.0)
            .bands(">50", "<50")
            .interpretation("Month-on-month momentum; above 50 is expansion, a run below 50 is contraction.")
            .series(latest("CN_PMI_MFG")),
        IndicatorDef::new("industrial_value_added", "Industrial Value Added YoY (%)", Dimension::Macro, higher(6.0, 4.0))
            .fallback(5.2, 60.0)
            .bands(">6%", "<4%")
            .interpretation("Production-side activity; weak readings point to soft supply chains or demand.")
            .series(latest("CN_IVA_YOY")),
        IndicatorDef::new("retail_sales_yoy", "Retail Sales YoY (%)", Dimension::Macro, higher(6.0, 4.0))
            .fallback(5.0, 60.0)
            .bands(">6%", "<4%")
            .interpretation("Domestic consumption capacity, the core gauge of the economy's rebalancing.")
            .series(latest("CN_RETAIL_YOY")),
        // Liquidity
        IndicatorDef::new(
            "social_financing_growth",
            "Social Financing Stock Growth (%)",
            Dimension::Liquidity,
            step(Direction::HigherIsBetter, 9.0, 90.0, 40.0),
        )
        .fallback(9.5, 70.0)
        .bands("Stabilizing / rebounding", "Persistent decline")
        .interpretation("Credit demand of the real economy; running above nominal GDP signals future activity.")
        .series(latest("CN_TSF_STOCK_YOY")),
        IndicatorDef::new("m2_yoy", "M2 YoY (%)", Dimension::Liquidity, higher(9.0, 5.0))
            .fallback(7.0, 60.0)
            .bands(">8%", "<7%")
            .interpretation("Broad money supply; too high can idle in the financial system, too low adds deflation pressure.")
            .series(latest("CN_M2_YOY")),
        IndicatorDef::new("shibor_overnight", "Shibor Overnight (%)", Dimension::Liquidity, lower(1.5, 5.5))
            .fallback(3.5, 60.0)
            .bands("Low / falling", "Spiking")
            .interpretation("Interbank funding cost; shows directly how tight short-term money is.")
            .series(latest("CN_SHIBOR_ON")),
        IndicatorDef::new("lpr_1y", "LPR 1Y (%)", Dimension::Liquidity, lower(1.5, 3.5))
            .fallback(2.5, 60.0)
            .bands("Cut / unchanged", "Hiked")
            .interpretation("Benchmark lending rate; cuts ease corporate financing and housing.")
            .series(latest("CN_LPR_1Y")),
        // Trend
        IndicatorDef::new(
            "sse_vs_ma30",
            "SSE Composite vs 30D MA (%)",
            Dimension::Trend,
            step(Direction::HigherIsBetter, 0.0, 100.0, 10.0),
        )
        .fallback(0.0, 60.0)
        .bands("Above 30-day average", "Below 30-day average")
        .interpretation("Short-to-medium-term trend line; hold above it, stay in cash below it.")
        .series(SeriesSpec::MovingAverageGap {
            series_id: "SSE_COMPOSITE_CLOSE".to_string(),
            window: 30,
        }),
        IndicatorDef::new("a_share_pe", "A-Share P/E", Dimension::Trend, lower(15.0, 20.0))
            .fallback(17.5, 60.0)
            .bands("<15x", ">20x")
            .interpretation("How cheap or expensive the market is; read together with earnings growth (PEG).")
            .series(latest("SSE_PE_AVG")),
        IndicatorDef::new("margin_balance", "Margin Financing Balance (100M CNY)", Dimension::Trend, higher(25_000.0, 15_000.0))
            .fallback(20_000.0, 60.0)
            .bands("Rising", "Falling")
            .interpretation("Direction of leveraged risk appetite.")
            .series(SeriesSpec::Latest {
                series_id: "CN_MARGIN_FIN_BAL".to_string(),
                scale: 1e-8,
            }),
        // Sentiment
        IndicatorDef::new(
            "northbound_flow",
            "Northbound Net Buying (100M CNY)",
            Dimension::Sentiment,
            step(Direction::HigherIsBetter, 0.0, 100.0, 20.0),
        )
        .fallback(10.5, 60.0)
        .bands("Inflow", "Outflow")
        .interpretation("Where the smart money is heading.")
        .series(SeriesSpec::Latest {
            series_id: "HSGT_NORTHBOUND_NET".to_string(),
            scale: 1e-8,
        }),
        IndicatorDef::new("sse_turnover", "SSE Turnover (100M CNY)", Dimension::Sentiment, higher(10_000.0, 6_000.0))
            .fallback(8_000.0, 60.0)
            .bands(">1T", "<0.6T")
            .interpretation("Volume leads price; rallies without volume rarely last, record-low volume often marks a floor.")
            .series(SeriesSpec::Latest {
                series_id: "SSE_TURNOVER".to_string(),
                scale: 1e-8,
            }),
        // Risk
        IndicatorDef::new("volatility_index", "Volatility Index", Dimension::Risk, ScoringRule::Constant { score: 80.0 })
            .fallback(18.5, 80.0)
            .bands("Low", "Spiking")
            .interpretation("Risk-aversion gauge, maintained manually as a proxy.")
            .series(SeriesSpec::Manual { value: 18.5 }),
        IndicatorDef::new(
            "usd_cnh",
            "USD/CNH",
            Dimension::Risk,
            step(Direction::LowerIsBetter, 7.2, 100.0, 30.0),
        )
        .fallback(7.18, 60.0)
        .bands("Appreciating / stable", "Depreciating")
        .interpretation("Capital outflow pressure.")
        .series(latest("USDCNH")),
    ]
}
