// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Pathedit: headless SVG path editor

fn main() -> anyhow::Result<()> {
    pathedit::run()
}
