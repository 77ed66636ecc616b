// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_document(steps: usize) -> String {
    let mut doc = String::from(concat!(
        "Counting\n",
        "========\n",
        "\n",
        ".. diff-doc:: start counter\n",
        "    :language: python\n",
        "    :render: True\n",
        "\n",
        "    total = 0\n",
        "    print(total)\n",
        "\n",
    ));

    for step in 1..=steps {
        doc.push_str(&format!("Step {step} adds {step}.\n\n"));
        doc.push_str(&format!(
            concat!(
                ".. diff-doc:: diff counter\n",
                "    :render: True\n",
                "\n",
                "    ---\n",
                "    +++\n",
                "    @@ -{line},2 +{line},3 @@\n",
                "     {previous}\n",
                "    +total += {step}\n",
                "     print(total)\n",
                "\n",
            ),
            line = step,
            previous = previous_line(step),
            step = step,
        ));
    }
    doc
}

fn previous_line(step: usize) -> String {
    if step == 1 {
        "total = 0".to_string()
    } else {
        format!("total += {}", step - 1)
    }
}
