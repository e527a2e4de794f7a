use cfg_aliases::cfg_aliases;

fn main() {
    cfg_aliases! {
        // Register-level drivers. Everything else builds on the host.
        hw: { feature = "g4" },
    }
}
