//! Fixed list of monitored areas.
//!
//! Names must match the official area names the citydata API recognises,
//! otherwise the response carries no congestion block and the place is dropped.

/// Areas polled on every run.
pub const PLACES: &[&str] = &[
    // Tourist zones and palaces
    "강남역", "가로수길", "여의도", "홍대 관광특구", "명동 관광특구", "이태원 관광특구", "잠실 관광특구",
    "동대문 관광특구", "종로·청계 관광특구", "경복궁", "광화문·덕수궁", "창덕궁·종묘",
    // Stations
    "가산디지털단지역", "건대입구역", "고속터미널역", "교대역", "구로디지털단지역", "서울역", "선릉역",
    "신도림역", "신림역", "신촌·이대역", "역삼역", "연신내역", "왕십리역", "용산역", "이태원역",
    "장한평역", "종로3가역", "합정역",
    // Neighbourhoods and streets
    "DMC(디지털미디어시티)", "창동 신경제 중심지", "노량진", "낙산공원·이화마을", "북촌한옥마을", "서촌",
    "성수카페거리", "수유리 먹자골목", "쌍문동 맛집거리", "압구정로데오거리", "영등포 타임스퀘어",
    "인사동·익선동",
    // Parks
    "국립중앙박물관·용산가족공원", "남산공원", "뚝섬한강공원", "망원한강공원", "반포한강공원",
    "북서울꿈의숲", "서울대공원", "서울숲공원", "월드컵공원", "이촌한강공원", "잠실종합운동장",
    "잠실한강공원", "어린이대공원",
    // Food streets and markets
    "샤로수길", "송리단길", "행리단길", "광장시장", "노량진 수산시장", "가락시장", "망원시장", "통인시장",
];
