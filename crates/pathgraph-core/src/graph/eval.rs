//! Cost and estimate evaluators for weighted searches

use serde::{Deserialize, Serialize};

use crate::error::{PathError, Result};
use crate::graph::model::{Node, Relationship};
use crate::graph::types::Direction;

/// Mean earth radius used by [`GeoEstimate`], in metres
pub const EARTH_RADIUS_METRES: f64 = 6_371_000.0;

/// Cost of traversing one relationship.
///
/// Costs must be finite and non-negative; weighted finders abort with
/// [`PathError::ContractViolation`] when they are not.
pub trait CostEvaluator: Send + Sync {
    /// Cost of walking `relationship` in `direction` (relative to the node the
    /// search is leaving)
    fn cost(&self, relationship: &Relationship, direction: Direction) -> Result<f64>;
}

impl<F> CostEvaluator for F
where
    F: Fn(&Relationship, Direction) -> f64 + Send + Sync,
{
    fn cost(&self, relationship: &Relationship, direction: Direction) -> Result<f64> {
        Ok(self(relationship, direction))
    }
}

/// Estimated remaining cost from a node to the goal.
///
/// A* only finds the cheapest path when the estimate never exceeds the true
/// remaining cost (admissible). This is the caller's obligation; the finder
/// cannot check it.
pub trait EstimateEvaluator: Send + Sync {
    fn estimate(&self, node: &Node, goal: &Node) -> f64;
}

impl<F> EstimateEvaluator for F
where
    F: Fn(&Node, &Node) -> f64 + Send + Sync,
{
    fn estimate(&self, node: &Node, goal: &Node) -> f64 {
        self(node, goal)
    }
}

/// How a [`PropertyCost`] reads its property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberKind {
    /// Integers and floats
    Double,
    /// Integers only
    Int,
}

/// Cost read from a numeric relationship property
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyCost {
    property: String,
    default: Option<f64>,
    kind: NumberKind,
}

impl PropertyCost {
    pub fn property(&self) -> &str {
        &self.property
    }
}

impl CostEvaluator for PropertyCost {
    fn cost(&self, relationship: &Relationship, _direction: Direction) -> Result<f64> {
        let missing = || PathError::MissingProperty {
            key: self.property.clone(),
            relationship: relationship.id(),
        };

        let value = match relationship.property(&self.property) {
            Some(value) => value,
            None => return self.default.ok_or_else(missing),
        };

        let number = match self.kind {
            NumberKind::Double => value.as_f64(),
            NumberKind::Int => value.as_i64().map(|v| v as f64),
        };
        number.ok_or_else(|| {
            PathError::invalid_value(
                "cost property",
                format!(
                    "'{}' on relationship {} is not numeric: {}",
                    self.property,
                    relationship.id(),
                    value
                ),
            )
        })
    }
}

/// Every relationship costs the same
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantCost(f64);

impl CostEvaluator for ConstantCost {
    fn cost(&self, _relationship: &Relationship, _direction: Direction) -> Result<f64> {
        Ok(self.0)
    }
}

fn coordinates(node: &Node, a: &str, b: &str) -> Option<(f64, f64)> {
    Some((node.property(a)?.as_f64()?, node.property(b)?.as_f64()?))
}

/// Straight-line distance between two numeric coordinate properties.
///
/// Nodes without coordinates estimate 0, which keeps the estimate admissible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EuclideanEstimate {
    pub x: String,
    pub y: String,
}

impl EstimateEvaluator for EuclideanEstimate {
    fn estimate(&self, node: &Node, goal: &Node) -> f64 {
        match (
            coordinates(node, &self.x, &self.y),
            coordinates(goal, &self.x, &self.y),
        ) {
            (Some((x1, y1)), Some((x2, y2))) => (x1 - x2).hypot(y1 - y2),
            _ => 0.0,
        }
    }
}

/// Great-circle (haversine) distance in metres between latitude/longitude
/// properties given in degrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoEstimate {
    pub lat: String,
    pub lon: String,
}

impl EstimateEvaluator for GeoEstimate {
    fn estimate(&self, node: &Node, goal: &Node) -> f64 {
        let (Some((lat1, lon1)), Some((lat2, lon2))) = (
            coordinates(node, &self.lat, &self.lon),
            coordinates(goal, &self.lat, &self.lon),
        ) else {
            return 0.0;
        };

        let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
        let d_phi = (lat2 - lat1).to_radians();
        let d_lambda = (lon2 - lon1).to_radians();
        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METRES * a.sqrt().min(1.0).asin()
    }
}

/// Coordinate-based estimate selected by configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CoordinateEstimate {
    Euclidean(EuclideanEstimate),
    Geo(GeoEstimate),
}

impl EstimateEvaluator for CoordinateEstimate {
    fn estimate(&self, node: &Node, goal: &Node) -> f64 {
        match self {
            CoordinateEstimate::Euclidean(e) => e.estimate(node, goal),
            CoordinateEstimate::Geo(g) => g.estimate(node, goal),
        }
    }
}

/// Constructors for the common evaluators
pub struct CommonEvaluators;

impl CommonEvaluators {
    /// Numeric property as cost; a missing property is an error
    pub fn double_cost(property: impl Into<String>) -> PropertyCost {
        PropertyCost {
            property: property.into(),
            default: None,
            kind: NumberKind::Double,
        }
    }

    /// Numeric property as cost, `default` when the property is absent
    pub fn double_cost_or(property: impl Into<String>, default: f64) -> PropertyCost {
        PropertyCost {
            property: property.into(),
            default: Some(default),
            kind: NumberKind::Double,
        }
    }

    /// Integer property as cost
    pub fn int_cost(property: impl Into<String>) -> PropertyCost {
        PropertyCost {
            property: property.into(),
            default: None,
            kind: NumberKind::Int,
        }
    }

    pub fn constant_cost(cost: f64) -> ConstantCost {
        ConstantCost(cost)
    }

    pub fn euclidean_estimate(x: impl Into<String>, y: impl Into<String>) -> EuclideanEstimate {
        EuclideanEstimate {
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn geo_estimate(lat: impl Into<String>, lon: impl Into<String>) -> GeoEstimate {
        GeoEstimate {
            lat: lat.into(),
            lon: lon.into(),
        }
    }
}
