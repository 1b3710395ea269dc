pub mod create_event;
pub mod get_event_agenda;
pub mod get_event_occurrences;
pub mod get_occurrence;
pub mod get_upcoming_occurrences;

pub use create_event::CreateEventUseCase;
pub use get_event_agenda::GetEventAgendaUseCase;
pub use get_event_occurrences::GetEventOccurrencesUseCase;
pub use get_occurrence::GetOccurrenceUseCase;
pub use get_upcoming_occurrences::GetUpcomingOccurrencesUseCase;
