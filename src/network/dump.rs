use std::fmt::Write;

use crate::math::matrix::Matrix;
use crate::network::network::BackPropNetwork;

/// Renders every weight, delta, beta and activation buffer of `network`
/// followed by its topology and hyperparameters.
pub fn dump(network: &BackPropNetwork) -> String {
    let mut out = String::from("Debug print BP memory structures:\n\n");

    write_matrix(&mut out, "Wij", network.weights_ij());
    write_matrix(&mut out, "Wjk", network.weights_jk());
    out.push('\n');

    write_matrix(&mut out, "deltaWij", network.delta_weights_ij());
    write_matrix(&mut out, "deltaWjk", network.delta_weights_jk());
    out.push('\n');

    write_vector(&mut out, "betaJ", network.beta_hidden());
    write_vector(&mut out, "betaK", network.beta_output());
    out.push('\n');

    write_vector(&mut out, "Oi", network.input());
    write_vector(&mut out, "Oj", network.hidden());
    write_vector(&mut out, "Ok", network.output());
    write_vector(&mut out, "d", network.desired());
    out.push('\n');

    let t = network.topology();
    let _ = writeln!(out, "Layer Nodes: I={}, J={}, K={}", t.inputs, t.hidden, t.outputs);
    let _ = writeln!(
        out,
        "Learning Rate={:5.3}, Error Margin={:5.3}",
        network.learning_rate(),
        network.error_margin()
    );
    out
}

fn write_vector(out: &mut String, name: &str, values: &[f64]) {
    let _ = write!(out, "{name}: \t");
    for v in values {
        let _ = write!(out, "{v:7.3} ");
    }
    out.push('\n');
}

fn write_matrix(out: &mut String, name: &str, m: &Matrix) {
    let _ = writeln!(out, "{name}:");
    for row in &m.data {
        out.push('\t');
        for v in row {
            let _ = write!(out, "{v:7.3} ");
        }
        out.push('\n');
    }
    out.push('\n');
}
