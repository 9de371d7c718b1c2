//! Moving a step's flows into the nodes at either end of the link.
//!
//! The conductive flow moves like any conductor's. The reaction products and
//! consumed reactants enter the downstream node as two extra flows, and the
//! molar imbalance they cause is returned as a source term for the network
//! solver's next iteration. Moles are conserved over time, at the cost of a
//! small pressure error within a single frame.

use uom::{
    ConstZero,
    si::{f64::MassRate, mass_rate::kilogram_per_second},
};

use crate::support::{
    thermo::{Mixture, State},
    units::MolarRate,
};

use super::{AuxiliaryFlow, Step};

/// Flow rates at or below this magnitude (kg/s) are not moved.
pub const NEGLIGIBLE_FLOW_RATE: f64 = 100.0 * f64::EPSILON;

/// A network node that receives mass from links.
pub trait FlowNode {
    /// Adds inflow of `fluid` at `rate`. A negative rate removes that fluid.
    fn collect_influx(&mut self, rate: MassRate, fluid: &State<Mixture>);

    /// Removes outflow at `rate` with the node's own composition.
    fn collect_outflux(&mut self, rate: MassRate);
}

/// Molar source terms for each port, read by the solver on its next iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceTerms {
    pub port_a: MolarRate,
    pub port_b: MolarRate,
}

impl SourceTerms {
    pub const ZERO: Self = Self {
        port_a: MolarRate::ZERO,
        port_b: MolarRate::ZERO,
    };
}

/// Moves a step's conductive and reaction flows between `node_a` and `node_b`.
///
/// Positive flow runs from A to B. Reaction flows always enter the
/// downstream node, and only that port receives a nonzero source term.
pub fn transport<A, B>(step: &Step, node_a: &mut A, node_b: &mut B) -> SourceTerms
where
    A: FlowNode + ?Sized,
    B: FlowNode + ?Sized,
{
    let negligible = MassRate::new::<kilogram_per_second>(NEGLIGIBLE_FLOW_RATE);
    let flow_rate = step.flow_rate;
    if flow_rate.abs() <= negligible {
        return SourceTerms::ZERO;
    }

    let source = step.products.molar_rate() + step.reactants.molar_rate();

    if flow_rate > MassRate::ZERO {
        node_a.collect_outflux(flow_rate);
        node_b.collect_influx(flow_rate, &step.outlet);
        inject(step, node_b, negligible);
        SourceTerms {
            port_a: MolarRate::ZERO,
            port_b: source,
        }
    } else {
        node_b.collect_outflux(-flow_rate);
        node_a.collect_influx(-flow_rate, &step.outlet);
        inject(step, node_a, negligible);
        SourceTerms {
            port_a: source,
            port_b: MolarRate::ZERO,
        }
    }
}

fn inject<N: FlowNode + ?Sized>(step: &Step, node: &mut N, negligible: MassRate) {
    if step.products.rate > negligible {
        collect(&step.products, node);
    }
    if step.reactants.rate < MassRate::ZERO {
        collect(&step.reactants, node);
    }
}

fn collect<N: FlowNode + ?Sized>(flow: &AuxiliaryFlow, node: &mut N) {
    if let Some(state) = &flow.state {
        node.collect_influx(flow.rate, state);
    }
}
