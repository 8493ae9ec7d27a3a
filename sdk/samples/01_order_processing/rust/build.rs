// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

fn main() -> anyhow::Result<()> {
    proxygen_gen::Builder::new().compile()?;
    Ok(())
}
