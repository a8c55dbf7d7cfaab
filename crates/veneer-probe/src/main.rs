// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Creates a device through the Veneer entry points and prints what came out.
// Run with: veneer-probe [--level 11_0 ...] [--adapter N] [--swapchain WxH]

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use veneer_core::renderer::{AdapterFactory, BackendLoader, SwapChain};
use veneer_infra::{load_startup_config, ConfFileSource, WgpuLoader};
use veneer_sdk::prelude::*;

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct ProbeArgs {
    levels: Vec<FeatureLevel>,
    adapter: Option<usize>,
    swap_chain: Option<(u32, u32)>,
}

fn print_help() {
    println!("Usage: veneer-probe [--level 11_0 ...] [--adapter N] [--swapchain WxH]\n");
    println!("  --level <L>      Candidate feature level, highest first. Repeatable.");
    println!("  --adapter <N>    Create on the adapter at index N instead of the default.");
    println!("  --swapchain WxH  Also create an offscreen swap chain of that size.");
}

fn parse_size(text: &str) -> Result<(u32, u32)> {
    let (width, height) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("expected WxH, found '{text}'"))?;
    Ok((
        width.parse().with_context(|| format!("bad width in '{text}'"))?,
        height.parse().with_context(|| format!("bad height in '{text}'"))?,
    ))
}

/// Returns `None` when help was requested.
fn parse_args(args: &[String]) -> Result<Option<ProbeArgs>> {
    let mut parsed = ProbeArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .ok_or_else(|| anyhow!("{name} expects a value"))
        };
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--level" => parsed.levels.push(value("--level")?.parse()?),
            "--adapter" => {
                parsed.adapter = Some(
                    value("--adapter")?
                        .parse()
                        .context("--adapter expects an index")?,
                )
            }
            "--swapchain" => parsed.swap_chain = Some(parse_size(value("--swapchain")?)?),
            other => bail!("unknown argument '{other}'"),
        }
    }
    Ok(Some(parsed))
}

fn run(args: ProbeArgs) -> Result<Status> {
    let loader = Arc::new(WgpuLoader::new());
    let runtime = DeviceRuntime::new(
        loader.clone(),
        Arc::new(ConfFileSource::from_executable_dir()?),
        load_startup_config()?,
    );

    let mut params = CreateDeviceParams::default();
    if let Some(index) = args.adapter {
        let factory: Arc<dyn AdapterFactory> = loader.create_factory()?;
        let adapter = factory
            .enum_adapter(index)
            .ok_or_else(|| anyhow!("no adapter at index {index}"))?;
        println!("Adapter {index}: {}", adapter.desc().description);
        params = params.with_adapter(adapter);
    }
    if !args.levels.is_empty() {
        params = params.with_feature_levels(&args.levels);
    }

    let mut device = None;
    let mut level = None;
    let mut swap_chain: Option<Arc<dyn SwapChain>> = None;
    let outputs = DeviceOutputs {
        device: Some(&mut device),
        feature_level: Some(&mut level),
        context: None,
    };
    let status = match args.swap_chain {
        Some((width, height)) => {
            let desc = SwapChainDescriptor {
                width,
                height,
                ..Default::default()
            };
            runtime.create_device_and_swap_chain(
                &params,
                Some(&desc),
                Some(&mut swap_chain),
                outputs,
            )
        }
        None => runtime.create_device(&params, outputs),
    };

    println!("Status: {status}");
    if let Some(device) = &device {
        let info = device.adapter_info();
        println!(
            "Device: \"{}\" ({:?}, {:?})",
            info.name, info.backend_type, info.device_type
        );
    }
    if let Some(level) = level {
        println!("Feature level: {level}");
    }
    if let Some(swap_chain) = &swap_chain {
        let desc = swap_chain.descriptor();
        println!(
            "Swap chain: {}x{}, {} buffers",
            desc.width, desc.height, desc.buffer_count
        );
    }
    Ok(status)
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = parse_args(&args)? else {
        print_help();
        return Ok(());
    };

    let status = run(args)?;
    if !status.is_success() {
        bail!("device creation failed with {status}");
    }
    Ok(())
}
