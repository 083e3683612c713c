//! Domain Services
//!
//! Pure domain logic, independent of the data layer so it can be tested
//! without a database.

use crate::domain::entities::ChapterOutline;

/// Aggregated progress over one course for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSummary {
    pub total_lessons: u32,
    pub completed_lessons: u32,
    pub percentage: u32,
}

/// Completion percentage, rounded half up; 0 when there are no lessons
pub fn completion_percentage(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    // Integer round-half-up of 100 * completed / total
    let completed = completed as u64;
    let total = total as u64;
    ((200 * completed + total) / (2 * total)) as u32
}

/// Fold chapters, lessons, and per-lesson completion into a summary
pub fn aggregate_progress(chapters: &[ChapterOutline]) -> ProgressSummary {
    let mut total = 0u32;
    let mut completed = 0u32;

    for chapter in chapters {
        for lesson in &chapter.lessons {
            total += 1;
            if lesson.completed {
                completed += 1;
            }
        }
    }

    ProgressSummary {
        total_lessons: total,
        completed_lessons: completed,
        percentage: completion_percentage(completed, total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Chapter, Lesson, LessonOutline};
    use kernel::id::{ChapterId, CourseId, LessonId};

    fn outline(lessons_per_chapter: &[usize], completed: usize) -> Vec<ChapterOutline> {
        let course_id = CourseId::new();
        let mut remaining = completed;

        lessons_per_chapter
            .iter()
            .enumerate()
            .map(|(ci, &count)| {
                let chapter_id = ChapterId::new();
                let lessons = (0..count)
                    .map(|li| {
                        let done = remaining > 0;
                        if done {
                            remaining -= 1;
                        }
                        LessonOutline {
                            lesson: Lesson {
                                lesson_id: LessonId::new(),
                                chapter_id,
                                title: format!("Lesson {li}"),
                                description: None,
                                video_key: None,
                                position: li as i32,
                            },
                            completed: done,
                        }
                    })
                    .collect();

                ChapterOutline {
                    chapter: Chapter {
                        chapter_id,
                        course_id,
                        title: format!("Chapter {ci}"),
                        position: ci as i32,
                    },
                    lessons,
                }
            })
            .collect()
    }

    #[test]
    fn test_zero_lessons_is_zero_percent() {
        let summary = aggregate_progress(&outline(&[], 0));
        assert_eq!(summary.total_lessons, 0);
        assert_eq!(summary.completed_lessons, 0);
        assert_eq!(summary.percentage, 0);

        // A course with empty chapters is the same as no chapters
        let summary = aggregate_progress(&outline(&[0, 0, 0], 0));
        assert_eq!(summary.percentage, 0);
    }

    #[test]
    fn test_three_of_six_is_fifty() {
        let summary = aggregate_progress(&outline(&[2, 2, 2], 3));
        assert_eq!(summary.total_lessons, 6);
        assert_eq!(summary.completed_lessons, 3);
        assert_eq!(summary.percentage, 50);
    }

    #[test]
    fn test_rounds_half_up() {
        // 1/8 = 12.5% -> 13
        assert_eq!(completion_percentage(1, 8), 13);
        // 1/3 = 33.33% -> 33
        assert_eq!(completion_percentage(1, 3), 33);
        // 2/3 = 66.67% -> 67
        assert_eq!(completion_percentage(2, 3), 67);
        // 1/200 = 0.5% -> 1
        assert_eq!(completion_percentage(1, 200), 1);
    }

    #[test]
    fn test_bounds() {
        for total in 0..=20u32 {
            for completed in 0..=total {
                let pct = completion_percentage(completed, total);
                assert!(pct <= 100, "{completed}/{total} gave {pct}");
                if total > 0 && completed == total {
                    assert_eq!(pct, 100);
                }
                if completed == 0 {
                    assert_eq!(pct, 0);
                }
            }
        }
    }
}
