use anyhow::Result;
use recordscout::{
    Delays, EngineConfig, ExecutionMode, LookupError, NewRecord, Record, RecordEngine, RecordStore,
};
use std::collections::{BTreeSet, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const MODES: [ExecutionMode; 2] = [ExecutionMode::Concurrent, ExecutionMode::Sequential];

fn config(delays: Delays) -> EngineConfig {
    EngineConfig {
        thread_count: NonZeroUsize::new(4).unwrap(),
        delays,
        ..EngineConfig::default()
    }
}

fn three_record_engine(delays: Delays) -> Result<RecordEngine> {
    let store = RecordStore::from_records(vec![
        Record::new(1, "Juan García", "juan@example.com"),
        Record::new(2, "María López", "maria@example.com"),
        Record::new(3, "Carlos García", "carlos@example.com"),
    ]);
    Ok(RecordEngine::new(Arc::new(store), &config(delays))?)
}

fn seeded_engine(count: usize) -> Result<RecordEngine> {
    let config = EngineConfig {
        seed_count: count,
        ..config(Delays::uniform(0))
    };
    Ok(RecordEngine::from_config(&config)?)
}

#[test]
fn test_list_all_returns_seed_in_order() -> Result<()> {
    let engine = seeded_engine(100)?;
    let records = engine.list_all();

    assert_eq!(records.len(), 100);
    let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, (1..=100).collect::<Vec<_>>());
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 100);
    Ok(())
}

#[test]
fn test_find_by_id_scenario() -> Result<()> {
    let engine = three_record_engine(Delays::uniform(1))?;

    for mode in MODES {
        let record = engine.find_by_id(2, mode)?;
        assert_eq!(record.id, 2);
        assert_eq!(record.name, "María López");

        let err = engine.find_by_id(99, mode).unwrap_err();
        assert!(matches!(err, LookupError::NotFound(99)));
    }
    Ok(())
}

#[test]
fn test_find_by_id_every_seeded_record() -> Result<()> {
    let engine = seeded_engine(40)?;

    for mode in MODES {
        for id in [1, 17, 40] {
            assert_eq!(engine.find_by_id(id, mode)?.id, id);
        }
        assert!(engine.find_by_id(0, mode).unwrap_err().is_not_found());
        assert!(engine.find_by_id(41, mode).unwrap_err().is_not_found());
    }
    Ok(())
}

#[test]
fn test_search_scenario() -> Result<()> {
    let engine = three_record_engine(Delays::uniform(1))?;

    for mode in MODES {
        let output = engine.search("garcía", mode)?;
        assert_eq!(output.total, 2);
        assert_eq!(output.ids(), BTreeSet::from([1, 3]));
    }

    let sequential = engine.search("garcía", ExecutionMode::Sequential)?;
    let ordered: Vec<u64> = sequential.records.iter().map(|r| r.id).collect();
    assert_eq!(ordered, vec![1, 3]);
    Ok(())
}

#[test]
fn test_search_is_stable_across_repetitions() -> Result<()> {
    let engine = seeded_engine(100)?;
    let expected = engine.search("ía", ExecutionMode::Sequential)?.ids();
    assert!(!expected.is_empty());

    for _ in 0..10 {
        let output = engine.search("ía", ExecutionMode::Concurrent)?;
        assert_eq!(output.ids(), expected);
        assert_eq!(output.total, expected.len());
    }
    Ok(())
}

#[test]
fn test_search_without_matches() -> Result<()> {
    let engine = seeded_engine(30)?;
    for mode in MODES {
        let output = engine.search("zzz", mode)?;
        assert!(output.is_empty());
        assert!(output.records.is_empty());
    }
    Ok(())
}

#[test]
fn test_process_all_completes_every_unit() -> Result<()> {
    let config = EngineConfig {
        seed_count: 100,
        ..config(Delays::uniform(1))
    };
    let engine = RecordEngine::from_config(&config)?;

    let concurrent = engine.process_all(ExecutionMode::Concurrent);
    assert_eq!(concurrent.completed, 100);
    assert_eq!(concurrent.mode.label(), "CONCURRENT");

    let sequential = engine.process_all(ExecutionMode::Sequential);
    assert_eq!(sequential.completed, 100);
    assert_eq!(sequential.mode.label(), "SEQUENTIAL");
    Ok(())
}

#[test]
fn test_concurrent_processing_beats_sequential() -> Result<()> {
    let engine = three_record_engine(Delays {
        identity_ms: 10,
        search_ms: 5,
        process_ms: 50,
    })?;

    let sequential = engine.process_all(ExecutionMode::Sequential);
    let concurrent = engine.process_all(ExecutionMode::Concurrent);

    assert_eq!(sequential.completed, 3);
    assert_eq!(concurrent.completed, 3);
    assert!(sequential.elapsed >= Duration::from_millis(150));
    assert!(
        concurrent.elapsed < sequential.elapsed,
        "concurrent {:?} should beat sequential {:?}",
        concurrent.elapsed,
        sequential.elapsed
    );
    Ok(())
}

#[test]
fn test_insert_then_find() -> Result<()> {
    let engine = three_record_engine(Delays::uniform(0))?;
    let payload = NewRecord::new("Ana Pérez", "ana@example.com");

    let created = engine.create(payload.clone());
    assert_eq!(created.id, 4);
    assert!(created.created_at.is_some());

    for mode in MODES {
        let found = engine.find_by_id(created.id, mode)?;
        assert_eq!(found, created);
        assert_eq!(found.name, payload.name);
        assert_eq!(found.email, payload.email);
    }
    assert_eq!(engine.list_all().last().map(|r| r.id), Some(4));
    Ok(())
}

#[test]
fn test_remove_then_find() -> Result<()> {
    let engine = three_record_engine(Delays::uniform(0))?;

    let removed = engine.delete(1)?;
    assert_eq!(removed.name, "Juan García");

    for mode in MODES {
        assert!(engine.find_by_id(1, mode).unwrap_err().is_not_found());
    }
    let output = engine.search("garcía", ExecutionMode::Concurrent)?;
    assert_eq!(output.ids(), BTreeSet::from([3]));
    Ok(())
}

#[test]
fn test_update_keeps_identity() -> Result<()> {
    let engine = three_record_engine(Delays::uniform(0))?;
    let created = engine.create(NewRecord::new("Luis Torres", "luis@example.com"));

    let updated = engine.update(created.id, NewRecord::new("Luis Ramírez", "lr@example.com"))?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(engine.find_by_id(created.id, ExecutionMode::Sequential)?, updated);
    Ok(())
}

#[test]
fn test_searches_run_alongside_writes() -> Result<()> {
    let engine = Arc::new(seeded_engine(50)?);

    let writer = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for i in 0..20 {
                engine.create(NewRecord::new(format!("Writer García {}", i), "w@example.com"));
            }
        })
    };

    for _ in 0..5 {
        let output = engine.search("garcía", ExecutionMode::Concurrent)?;
        // Every snapshot holds the ten seeded Garcías plus however many writes landed
        assert!(output.total >= 10 && output.total <= 30);
        assert_eq!(output.ids().len(), output.total);
    }

    writer.join().expect("writer thread panicked");
    assert_eq!(engine.list_all().len(), 70);
    assert_eq!(engine.search("garcía", ExecutionMode::Sequential)?.total, 30);
    Ok(())
}
