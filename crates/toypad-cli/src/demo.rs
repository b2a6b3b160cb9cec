//! Demo pad: the scanner and dump commands run against the mock reader,
//! with figurines moved on and off it on a timer.

use std::time::Duration;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use toypad_catalog::Catalog;
use toypad_core::constants::NTAG213_PAGE_COUNT;
use toypad_core::{AuthKey, TagUid};
use toypad_hardware::mock::{MockReader, MockReaderHandle, MockTag};
use toypad_hardware::{AnyTagReader, TagReader};
use toypad_scanner::{Figurines, ScannerConfig, TagScanner, dump_memory};
use toypad_tag::{KeyDerivation, ScrambleKeyDerivation};
use tracing::{debug, info};

use crate::report;

/// Pause with the pad empty between two figurines.
const SWAP_GAP: Duration = Duration::from_millis(600);

fn demo_uid(serial: u8) -> TagUid {
    TagUid::new([0x04, 0x4F, 0x9C, 0x2A, 0x61, 0x3B, serial])
}

/// Figurines presented by `toypad scan`, in order, with their payload
/// written at `payload_page`.
///
/// Two known characters, a known vehicle, a vehicle missing from the
/// catalog, and a tag whose password was not set by the vendor.
pub fn rotation(payload_page: u8) -> Vec<MockTag> {
    let figurines = Figurines::default().with_payload_page(payload_page);
    vec![
        figurines.character(demo_uid(0x81), 1u32),
        figurines.vehicle(demo_uid(0x82), 1000),
        figurines.character(demo_uid(0x83), 2u32),
        figurines.vehicle(demo_uid(0x84), 9_999),
        figurines
            .vehicle(demo_uid(0x85), 1006)
            .with_password(AuthKey::new([0xFF; 4])),
    ]
}

async fn present(
    pad: MockReaderHandle,
    tags: Vec<MockTag>,
    dwell: Duration,
    count: Option<usize>,
    cancel: CancellationToken,
) {
    let limit = count.unwrap_or(usize::MAX);
    for tag in tags.into_iter().cycle().take(limit) {
        debug!(uid = %tag.uid(), "placing figurine");
        pad.place_tag(tag).await;
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(dwell) => {}
        }

        pad.remove_tag().await;
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(SWAP_GAP) => {}
        }
    }
    cancel.cancel();
}

/// Run the scanner until Ctrl-C, or until `count` figurines were shown.
pub async fn scan(
    catalog: Catalog,
    config: ScannerConfig,
    dwell: Duration,
    count: Option<usize>,
) -> Result<()> {
    config.validate()?;

    let (mock, pad) = MockReader::with_name("Demo Pad".to_string());
    let reader = AnyTagReader::from(mock);
    let info = reader.get_reader_info().await?;
    println!("Reader: {} ({})", info.name, info.protocols.join(", "));
    println!("Place the tag on the reader!");

    let tags = rotation(config.payload_page);
    let (mut scanner, mut events) = TagScanner::new(reader, catalog, config);
    let cancel = CancellationToken::new();

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            for line in report::event_lines(&event) {
                println!("{line}");
            }
        }
    });
    let presenter = tokio::spawn(present(pad, tags, dwell, count, cancel.clone()));
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupted");
                cancel.cancel();
            }
        })
    };

    let stats = scanner.run(cancel).await?;

    // Closing the event channel lets the printer drain and finish.
    drop(scanner);
    printer.await?;
    presenter.abort();
    interrupt.abort();

    println!("{}", report::summary_line(&stats));
    Ok(())
}

/// Print the memory of a demo figurine, with or without its password.
pub async fn dump(tag: MockTag, authenticate: bool) -> Result<()> {
    let uid = tag.uid();
    let (mut reader, pad) = MockReader::new();
    pad.place_tag(tag).await;

    if authenticate {
        let key = ScrambleKeyDerivation::default().derive_key(&uid);
        reader.authenticate(&uid, &key).await?;
    }

    println!("Dump of all the card:");
    for row in dump_memory(&mut reader, &uid, NTAG213_PAGE_COUNT).await {
        println!("{}", report::page_line(&row));
    }
    Ok(())
}
