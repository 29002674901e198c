use std::time::Duration;

use crate::{
    event::*,
    event_log::{self, LogEvent, WithOffset},
};
use anyhow::Result;

fn started() -> Event {
    Event::AuctionStarted {
        item: "Vase".to_owned(),
    }
}

#[test]
fn event_logs_sanity_check() -> Result<()> {
    let (event_writer, event_reader) = event_log::new_in_memory_shared();

    let start_offset = event_reader.get_start_offset()?;

    assert_eq!(
        event_reader.read(start_offset, 0, Some(Duration::from_secs(0)))?,
        WithOffset {
            offset: start_offset,
            data: vec![]
        }
    );

    assert_eq!(
        event_reader.read(start_offset, 1, Some(Duration::from_secs(0)))?,
        WithOffset {
            offset: start_offset,
            data: vec![]
        }
    );

    event_writer.write(started());

    assert_eq!(
        event_reader.read(start_offset + 1, 1, Some(Duration::from_secs(0)))?,
        WithOffset {
            offset: start_offset + 1,
            data: vec![]
        }
    );

    assert_eq!(
        event_reader.read(start_offset, 1, Some(Duration::from_secs(0)))?,
        WithOffset {
            offset: start_offset + 1,
            data: vec![LogEvent {
                offset: start_offset,
                details: started()
            }]
        }
    );

    assert!(event_reader
        .read(start_offset + 2, 1, Some(Duration::from_secs(0)))
        .is_err());

    Ok(())
}

#[test]
fn blocked_reader_wakes_up_on_write() -> Result<()> {
    let (event_writer, event_reader) = event_log::new_in_memory_shared();

    let reader = std::thread::spawn(move || event_reader.read(0, 10, None));
    event_writer.write(started());

    let WithOffset { offset, data } = reader
        .join()
        .map_err(|e| anyhow::format_err!("{:?}", e))??;
    assert_eq!(offset, 1);
    assert_eq!(data[0].details, started());
    assert_eq!(data[0].details.item(), "Vase");
    Ok(())
}
