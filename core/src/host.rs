//! Setup driver for the modules of one simulated node.
//!
//! Stands in for the substrate's initialization pass: every module gets
//! stage 0 before any module gets stage 1, so whatever a module publishes in
//! an earlier stage is visible to all modules in later ones.

use anyhow::Context;
use tracing::debug;

use crate::ports::inbound::SimModule;

/// Runs all setup stages, stage-major. Stops at the first failure.
pub fn run_setup(modules: &mut [&mut dyn SimModule]) -> anyhow::Result<()> {
    let stages = modules
        .iter()
        .map(|module| module.num_setup_stages())
        .max()
        .unwrap_or(0);

    for stage in 0..stages {
        debug!("setup stage {stage}");
        for module in modules.iter_mut() {
            if stage >= module.num_setup_stages() {
                continue;
            }
            module
                .on_setup(stage)
                .with_context(|| format!("setup stage {stage} of '{}'", module.name()))?;
        }
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use mixnet_common::network::channel::ChannelId;
    use mixnet_protocols::message::Message;

    use super::*;
    use crate::ports::outbound::outbox::Outbox;

    struct Probe {
        name: String,
        stages: u8,
        fail_at: Option<u8>,
        log: Rc<RefCell<Vec<(String, u8)>>>,
    }

    impl SimModule for Probe {
        fn name(&self) -> &str {
            &self.name
        }

        fn num_setup_stages(&self) -> u8 {
            self.stages
        }

        fn on_setup(&mut self, stage: u8) -> anyhow::Result<()> {
            if self.fail_at == Some(stage) {
                anyhow::bail!("probe refused stage {stage}");
            }
            self.log.borrow_mut().push((self.name.clone(), stage));
            Ok(())
        }

        fn on_message(&mut self, _: ChannelId, _: Message, _: &mut dyn Outbox) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn probe(name: &str, stages: u8, log: &Rc<RefCell<Vec<(String, u8)>>>) -> Probe {
        Probe {
            name: name.to_string(),
            stages,
            fail_at: None,
            log: log.clone(),
        }
    }

    #[test]
    fn run_setup_is_stage_major() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut a = probe("a", 2, &log);
        let mut b = probe("b", 1, &log);
        let mut c = probe("c", 2, &log);
        run_setup(&mut [&mut a, &mut b, &mut c]).unwrap();

        let expected: Vec<(String, u8)> = [("a", 0), ("b", 0), ("c", 0), ("a", 1), ("c", 1)]
            .into_iter()
            .map(|(name, stage)| (name.to_string(), stage))
            .collect();
        assert_eq!(*log.borrow(), expected);
    }

    #[test]
    fn run_setup_stops_at_first_failure() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut a = probe("a", 2, &log);
        a.fail_at = Some(0);
        let mut b = probe("b", 2, &log);

        let err = run_setup(&mut [&mut a, &mut b]).unwrap_err();
        assert!(err.to_string().contains("setup stage 0 of 'a'"));
        assert!(log.borrow().is_empty());
    }
}
