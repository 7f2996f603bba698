//! End-to-end availability scenarios and invariants.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use u_timetable::models::{
    AcademyOccurrence, BlockSet, ClockTime, DayType, Exclusion, ExclusionType, IntervalSet,
    NonStudyBlock, NonStudyKind, ScheduleRequest, SchedulerOptions, SlotType, WeeklyBlock,
};
use u_timetable::{
    CacheKey, ScheduleAvailabilityResult, ScheduleCache, ScheduleEngine, ScheduleService,
};

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

fn afternoons() -> BlockSet {
    BlockSet::new("afternoons").with_blocks(WeeklyBlock::every_day(
        "14:00".parse().unwrap(),
        "18:00".parse().unwrap(),
    ))
}

fn scenario_a() -> ScheduleRequest {
    ScheduleRequest::new(d(1), d(14))
        .with_block_set(afternoons())
        .with_scheduler_options(SchedulerOptions::new(6, 1))
}

fn calculate(request: &ScheduleRequest) -> ScheduleAvailabilityResult {
    ScheduleEngine::default().calculate(request).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn days_of(result: &ScheduleAvailabilityResult, day_type: DayType) -> Vec<u32> {
    result
        .daily_schedule
        .iter()
        .filter(|s| s.day_type == day_type)
        .map(|s| s.date.day())
        .collect()
}

#[test]
fn test_scenario_a_plain_cycle() {
    let result = calculate(&scenario_a());
    let summary = &result.summary;

    assert_eq!(summary.total_days, 14);
    assert_eq!(days_of(&result, DayType::Review), vec![7, 14]);
    assert_eq!(summary.total_study_days, 12);
    assert_eq!(summary.total_review_days, 2);
    assert!(approx(summary.study_day_hours, 48.0));
    assert!(approx(summary.review_day_hours, 8.0));
    assert!(approx(summary.total_study_hours, 56.0));
    assert!(result.errors.is_empty());
}

#[test]
fn test_scenario_b_designated_holiday() {
    let result = calculate(&scenario_a().with_exclusion(Exclusion::designated_holiday(d(3))));
    let holiday = result.day(d(3)).unwrap();

    assert_eq!(holiday.day_type, DayType::DesignatedHoliday);
    assert!(approx(holiday.study_hours, 4.0));
    assert_eq!(holiday.minutes_of(SlotType::StudyTime), 0);
    assert_eq!(holiday.minutes_of(SlotType::SelfStudy), 240);

    // The holiday does not advance the cycle: the review lands on the
    // seventh advancing date.
    assert_eq!(days_of(&result, DayType::Review), vec![8]);
    assert_eq!(result.summary.total_exclusion_days.designated_holiday, 1);
    assert!(approx(result.summary.total_self_study_hours, 4.0));
}

#[test]
fn test_scenario_c_academy_with_travel() {
    let plain = calculate(&scenario_a());
    let result = calculate(
        &scenario_a().with_academy(
            AcademyOccurrence::parse(1, "16:00", "17:00", "Math")
                .unwrap()
                .with_travel_minutes(30),
        ),
    );

    let mondays: Vec<_> = result
        .daily_schedule
        .iter()
        .filter(|s| s.date.weekday() == chrono::Weekday::Mon)
        .collect();
    assert_eq!(mondays.len(), 2);

    for monday in mondays {
        let travel: Vec<String> = monday
            .slots_of(SlotType::TravelTime)
            .map(|s| s.interval().to_string())
            .collect();
        assert_eq!(travel, vec!["15:30~16:00", "17:00~17:30"]);
        let academy: Vec<String> = monday
            .slots_of(SlotType::Academy)
            .map(|s| s.interval().to_string())
            .collect();
        assert_eq!(academy, vec!["16:00~17:00"]);

        let before = plain.day(monday.date).unwrap();
        assert_eq!(
            before.minutes_of(SlotType::StudyTime) - monday.minutes_of(SlotType::StudyTime),
            120
        );
    }
    assert_eq!(result.summary.academy_statistics.total_academy_schedules, 2);
}

#[test]
fn test_scenario_d_vacation() {
    let result = calculate(&scenario_a().with_exclusion(Exclusion::vacation(d(5))));
    let vacation = result.day(d(5)).unwrap();

    assert_eq!(vacation.day_type, DayType::Vacation);
    assert!(vacation.time_slots.is_empty());
    assert_eq!(vacation.study_hours, 0.0);
    assert_eq!(result.summary.total_exclusion_days.vacation, 1);
    // Leave days consume their cycle slot.
    assert_eq!(days_of(&result, DayType::Review), vec![7, 14]);
}

#[test]
fn test_idempotent_serialization() {
    let request = scenario_a()
        .with_exclusion(Exclusion::designated_holiday(d(3)))
        .with_academy(AcademyOccurrence::parse(2, "15:00", "16:00", "English").unwrap())
        .with_non_study(NonStudyBlock::parse(NonStudyKind::Dinner, "17:30", "18:30").unwrap());

    let first = serde_json::to_vec(&calculate(&request)).unwrap();
    let second = serde_json::to_vec(&calculate(&request)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_result_round_trips_through_json() {
    let result = calculate(&scenario_a().with_exclusion(Exclusion::personal(d(9))));
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"개인일정\""));
    assert!(json.contains("\"total_study_hours_학습일\""));
    let back: ScheduleAvailabilityResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn test_request_from_wire_json() {
    let json = r#"{
        "period_start": "2024-03-01",
        "period_end": "2024-03-14",
        "block_set": {
            "id": "bs-1",
            "name": "weekday afternoons",
            "blocks": [
                {"day_of_week": 1, "start_time": "14:00", "end_time": "18:00"},
                {"day_of_week": 3, "start_time": "14:00", "end_time": "18:00"}
            ]
        },
        "exclusions": [
            {"exclusion_date": "2024-03-06", "exclusion_type": "휴일지정", "reason": "school event"}
        ],
        "academy_schedules": [
            {"day_of_week": 1, "start_time": "16:00", "end_time": "17:00",
             "academy_name": "Math Hall", "travel_time": 30}
        ],
        "non_study_time_blocks": [
            {"type": "점심식사", "start_time": "12:00", "end_time": "13:00"}
        ],
        "scheduler_type": "1730_timetable",
        "scheduler_options": {"study_days": 6, "review_days": 1}
    }"#;
    let request: ScheduleRequest = serde_json::from_str(json).unwrap();
    let result = calculate(&request);

    let wednesday = result.day(d(6)).unwrap();
    assert_eq!(wednesday.day_type, DayType::DesignatedHoliday);
    assert_eq!(
        wednesday.exclusion.as_ref().map(|e| e.exclusion_type),
        Some(ExclusionType::DesignatedHoliday)
    );
    assert!(approx(wednesday.study_hours, 4.0));
    assert!(result.day(d(5)).unwrap().time_slots.is_empty());
}

#[test]
fn test_service_cache_hit() {
    let cache = Arc::new(ScheduleCache::new());
    let service = ScheduleService::new(ScheduleEngine::default(), Arc::clone(&cache));
    let request = scenario_a();

    let first = service.calculate(&request).unwrap();
    let key = CacheKey::for_engine(&request, service.engine().config()).unwrap();
    assert!(cache.has(&key));

    let second = service.calculate(&request.clone()).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    cache.invalidate(&key);
    let third = service.calculate(&request).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(*first, *third);
}

fn random_request(rng: &mut StdRng) -> ScheduleRequest {
    let start = d(1) + chrono::Days::new(rng.random_range(0..30));
    let end = start + chrono::Days::new(rng.random_range(0..60));
    let hm = |minutes: u16| ClockTime::from_minutes(minutes).unwrap();

    let mut blocks = BlockSet::new("random");
    for day in 0..7u8 {
        // Up to two disjoint blocks per weekday; Sunday always has one so
        // the set is never empty.
        let mut cursor = rng.random_range(6..12u16) * 60;
        let count = if day == 0 { rng.random_range(1..3) } else { rng.random_range(0..3) };
        for _ in 0..count {
            let len = rng.random_range(1..5u16) * 60;
            blocks = blocks.with_block(WeeklyBlock::new(day, hm(cursor), hm(cursor + len)));
            cursor += len + rng.random_range(0..3u16) * 60;
        }
    }

    let mut request = ScheduleRequest::new(start, end)
        .with_block_set(blocks)
        .with_scheduler_options(SchedulerOptions::new(
            rng.random_range(1..=7),
            rng.random_range(0..=3),
        ));

    let period_days = (end - start).num_days() as u64 + 1;
    for _ in 0..rng.random_range(0..6) {
        let date = start + chrono::Days::new(rng.random_range(0..period_days));
        let kind = match rng.random_range(0..4) {
            0 => ExclusionType::Vacation,
            1 => ExclusionType::Personal,
            2 => ExclusionType::DesignatedHoliday,
            _ => ExclusionType::Other,
        };
        request = request.with_exclusion(Exclusion::new(date, kind));
    }

    for i in 0..rng.random_range(0..4) {
        let begin = rng.random_range(8..20u16) * 60 + rng.random_range(0..2u16) * 30;
        let occurrence = AcademyOccurrence::new(
            rng.random_range(0..7),
            hm(begin),
            hm(begin + rng.random_range(1..3u16) * 60),
            format!("academy-{i}"),
        )
        .with_travel_minutes(rng.random_range(0..4u16) * 15);
        request = request.with_academy(occurrence);
    }

    if rng.random_bool(0.5) {
        request = request
            .with_non_study(NonStudyBlock::parse(NonStudyKind::Lunch, "12:00", "13:00").unwrap());
    }
    if rng.random_bool(0.5) {
        request = request.with_non_study(
            NonStudyBlock::parse(NonStudyKind::Dinner, "18:00", "19:00")
                .unwrap()
                .on_weekdays([1, 3, 5]),
        );
    }
    request
}

#[test]
fn test_randomized_invariants() {
    let mut rng = StdRng::seed_from_u64(1730);

    for _ in 0..200 {
        let request = random_request(&mut rng);
        let result = calculate(&request);
        let period = request.period();

        // One contiguous entry per date.
        let dates: Vec<NaiveDate> = result.daily_schedule.iter().map(|s| s.date).collect();
        assert_eq!(dates, period.dates().collect::<Vec<_>>());

        let block_set = request.block_set.as_ref().unwrap();
        for day in &result.daily_schedule {
            let coverage = IntervalSet::from_intervals(
                block_set
                    .blocks_on(day.date.weekday())
                    .filter_map(WeeklyBlock::interval),
            );

            // Ordered, disjoint, inside coverage.
            for pair in day.time_slots.windows(2) {
                assert!(pair[0].end <= pair[1].start, "overlap on {}", day.date);
            }
            for slot in &day.time_slots {
                assert!(coverage.covers(&slot.interval()), "slot outside coverage");
            }

            let slot_minutes: u32 = day.time_slots.iter().map(|s| s.duration_minutes()).sum();
            if day.day_type.is_leave() {
                assert_eq!(slot_minutes, 0);
            } else {
                assert_eq!(slot_minutes, coverage.total_minutes(), "conservation on {}", day.date);
            }
            assert!(approx(day.study_hours, f64::from(day.study_minutes()) / 60.0));
            if day.day_type == DayType::DesignatedHoliday {
                assert_eq!(day.minutes_of(SlotType::StudyTime), 0);
            }
        }

        // Cycle: advancing dates follow the study/review pattern.
        let options = request.scheduler_options;
        let cycle = options.cycle_length() as usize;
        let advancing: Vec<_> = result
            .daily_schedule
            .iter()
            .filter(|s| s.day_type != DayType::DesignatedHoliday)
            .collect();
        for (position, day) in advancing.iter().enumerate() {
            let expect_review = position % cycle >= usize::from(options.study_days);
            match day.day_type {
                DayType::Study => assert!(!expect_review),
                DayType::Review => assert!(expect_review),
                _ => {}
            }
        }

        let summary = &result.summary;
        assert_eq!(summary.total_days as usize, result.daily_schedule.len());
        assert_eq!(
            summary.total_study_days
                + summary.total_review_days
                + summary.total_exclusion_days.total(),
            summary.total_days
        );
        let hours: f64 = result.daily_schedule.iter().map(|s| s.study_hours).sum();
        assert!((summary.total_study_hours - hours).abs() < 1e-6);
    }
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let engine = Arc::new(ScheduleEngine::default());
    let handles: Vec<_> = (0..4)
        .map(|offset| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let request = ScheduleRequest::new(d(1), d(10 + offset)).with_block_set(afternoons());
                engine.calculate(&request).map(|r| r.daily_schedule.len())
            })
        })
        .collect();

    for (offset, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap().unwrap(), 10 + offset);
    }
}
